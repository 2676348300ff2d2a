//! Total-marks computation and validation for OSCE stations.
//!
//! A station's marks come from two places: the items of its marking scheme
//! sections and its follow-up questions. The stored `total_marks` must always
//! equal the sum of both, so every write that touches scoring data goes
//! through [`validate_scoring_data`] and [`compute_total_marks`].

use db::models::osce_station::{FollowUp, MarkingSchemeSection};
use thiserror::Error;

/// Allowed drift between a caller-supplied total and the computed sum.
pub const TOTAL_MARKS_TOLERANCE: f64 = 0.01;

/// A violation of the scoring invariants, naming the offending element.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("a station must have at least one marking scheme item or one follow-up question")]
    MissingScoreContent,

    #[error("marking scheme section {position} must have a name")]
    EmptySectionName { position: usize },

    #[error("item {position} in section \"{section}\" must have a description")]
    MissingItemDescription { section: String, position: usize },

    #[error("score for item \"{desc}\" in section \"{section}\" must be a non-negative number")]
    InvalidItemScore { section: String, desc: String },

    #[error("follow-up question {position} must not be empty")]
    MissingFollowUpQuestion { position: usize },

    #[error("follow-up \"{question}\" must have at least one answer")]
    MissingFollowUpAnswer { question: String },

    #[error("score for follow-up \"{question}\" must be a non-negative number")]
    InvalidFollowUpScore { question: String },

    #[error("provided {provided} total marks does not match calculated {calculated}")]
    TotalMarksMismatch { provided: f64, calculated: f64 },
}

/// Sums every item score and follow-up score.
///
/// Pure and deterministic; the only failure is a negative (or NaN) score,
/// reported against the element carrying it. Empty sections and empty inputs
/// contribute zero.
pub fn compute_total_marks(
    sections: &[MarkingSchemeSection],
    follow_ups: &[FollowUp],
) -> Result<f64, ScoringError> {
    let mut total = 0.0;

    for section in sections {
        for item in &section.items {
            if !(item.score >= 0.0) {
                return Err(ScoringError::InvalidItemScore {
                    section: section.section.clone(),
                    desc: item.desc.clone(),
                });
            }
            total += item.score;
        }
    }

    for follow_up in follow_ups {
        if !(follow_up.score >= 0.0) {
            return Err(ScoringError::InvalidFollowUpScore {
                question: follow_up.question.clone(),
            });
        }
        total += follow_up.score;
    }

    Ok(total)
}

/// Checks the structural and arithmetic invariants of a station's scoring
/// data.
///
/// Called at creation and on any update whose patch touches the marking
/// scheme, follow-ups, or total marks (against the merged view of the
/// document). When `total_marks` is supplied it must match the computed sum
/// within [`TOTAL_MARKS_TOLERANCE`].
pub fn validate_scoring_data(
    sections: &[MarkingSchemeSection],
    follow_ups: &[FollowUp],
    total_marks: Option<f64>,
) -> Result<(), ScoringError> {
    let has_items = sections.iter().any(|s| !s.items.is_empty());
    let has_follow_ups = follow_ups.iter().any(|f| {
        !f.question.trim().is_empty() && f.answers.iter().any(|a| !a.trim().is_empty())
    });
    if !has_items && !has_follow_ups {
        return Err(ScoringError::MissingScoreContent);
    }

    for (index, section) in sections.iter().enumerate() {
        if section.section.trim().is_empty() {
            return Err(ScoringError::EmptySectionName { position: index + 1 });
        }
        for (item_index, item) in section.items.iter().enumerate() {
            if item.desc.trim().is_empty() {
                return Err(ScoringError::MissingItemDescription {
                    section: section.section.clone(),
                    position: item_index + 1,
                });
            }
            if !item.score.is_finite() || item.score < 0.0 {
                return Err(ScoringError::InvalidItemScore {
                    section: section.section.clone(),
                    desc: item.desc.clone(),
                });
            }
        }
    }

    for (index, follow_up) in follow_ups.iter().enumerate() {
        if follow_up.question.trim().is_empty() {
            return Err(ScoringError::MissingFollowUpQuestion { position: index + 1 });
        }
        if !follow_up.answers.iter().any(|a| !a.trim().is_empty()) {
            return Err(ScoringError::MissingFollowUpAnswer {
                question: follow_up.question.clone(),
            });
        }
        if !follow_up.score.is_finite() || follow_up.score < 0.0 {
            return Err(ScoringError::InvalidFollowUpScore {
                question: follow_up.question.clone(),
            });
        }
    }

    if let Some(provided) = total_marks {
        let calculated = compute_total_marks(sections, follow_ups)?;
        if !provided.is_finite() || (provided - calculated).abs() > TOTAL_MARKS_TOLERANCE {
            return Err(ScoringError::TotalMarksMismatch {
                provided,
                calculated,
            });
        }
    }

    Ok(())
}
