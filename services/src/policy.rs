//! Role-aware mutation rules for writer content.
//!
//! Every create, update, and delete on SBA submissions and OSCE stations goes
//! through these functions before anything is persisted. They take the caller
//! identity and the persisted document's ownership/status and return either
//! the fully resolved write (field set, final status, final rejection reason,
//! recomputed total where applicable) or an error; a handler never applies a
//! partial result.
//!
//! The rules, per caller and current status:
//!
//! - admins may write every allowed field in any status, including `status`
//!   itself; an unknown status value is an error. Moving a document out of
//!   `rejected` clears the stored rejection reason unless the admin supplies
//!   a replacement.
//! - the owning writer may edit content while the document is `draft`
//!   (optionally submitting it by requesting `pending`; anything else quietly
//!   stays `draft`) or `rejected` (which always resubmits as `pending` and
//!   clears the reason). Documents that are `pending` or `approved` are
//!   locked to the writer.
//! - everyone else is denied outright.

use std::str::FromStr;

use db::models::osce_station::{self, FollowUp, MarkingSchemeSection};
use db::models::review_status::ReviewStatus;
use db::models::submission;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::scoring::{self, ScoringError};

/// The authenticated identity a handler resolved from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub admin: bool,
}

impl Caller {
    pub fn admin(id: i64) -> Self {
        Self { id, admin: true }
    }

    pub fn writer(id: i64) -> Self {
        Self { id, admin: false }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("invalid status \"{0}\"")]
    InvalidStatus(String),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Resolves the status transition and final rejection reason for an update.
///
/// Owns the full role × status table; the typed per-content resolvers below
/// layer field handling on top of this.
fn resolve_review_transition(
    caller: &Caller,
    owner_id: i64,
    current_status: ReviewStatus,
    current_reason: Option<&str>,
    requested_status: Option<&str>,
    requested_reason: Option<&str>,
) -> Result<(ReviewStatus, Option<String>), PolicyError> {
    if caller.admin {
        let status = match requested_status {
            Some(raw) => parse_status(raw)?,
            None => current_status,
        };
        let reason = match (requested_reason, requested_status) {
            // An explicitly supplied reason always wins.
            (Some(reason), _) => Some(reason.to_string()),
            // Setting a non-rejected status without a reason clears the old one.
            (None, Some(_)) if status != ReviewStatus::Rejected => None,
            _ => current_reason.map(String::from),
        };
        return Ok((status, reason));
    }

    if caller.id != owner_id {
        return Err(PolicyError::Forbidden(
            "you may only modify your own content",
        ));
    }

    match current_status {
        ReviewStatus::Draft => {
            // Writers either re-save the draft or submit it; any other
            // requested status quietly stays a draft.
            let status = match requested_status.map(parse_status) {
                Some(Ok(ReviewStatus::Pending)) => ReviewStatus::Pending,
                _ => ReviewStatus::Draft,
            };
            Ok((status, current_reason.map(String::from)))
        }
        // Editing rejected content always resubmits it and drops the reason.
        ReviewStatus::Rejected => Ok((ReviewStatus::Pending, None)),
        ReviewStatus::Pending | ReviewStatus::Approved => Err(PolicyError::Forbidden(
            "content under review or already approved can only be changed by an admin",
        )),
    }
}

fn parse_status(raw: &str) -> Result<ReviewStatus, PolicyError> {
    let trimmed = raw.trim();
    ReviewStatus::from_str(trimmed).map_err(|_| PolicyError::InvalidStatus(trimmed.to_string()))
}

/// Resolves the writer and initial status for new content.
///
/// The writer is the caller unless an admin authors on a writer's behalf.
/// Content always starts life as `draft` or `pending`; an admin asking for
/// anything else gets an error, a writer quietly gets `pending`.
pub fn resolve_create(
    caller: &Caller,
    requested_writer: Option<i64>,
    requested_status: Option<&str>,
) -> Result<(i64, ReviewStatus), PolicyError> {
    let writer_id = match requested_writer {
        Some(writer) if caller.admin => writer,
        _ => caller.id,
    };

    let status = if caller.admin {
        match requested_status {
            Some(raw) => match parse_status(raw)? {
                status @ (ReviewStatus::Draft | ReviewStatus::Pending) => status,
                _ => return Err(PolicyError::InvalidStatus(raw.trim().to_string())),
            },
            None => ReviewStatus::Pending,
        }
    } else {
        match requested_status.map(parse_status) {
            Some(Ok(ReviewStatus::Draft)) => ReviewStatus::Draft,
            _ => ReviewStatus::Pending,
        }
    };

    Ok((writer_id, status))
}

/// Gate for fetching a single document.
pub fn authorize_read(caller: &Caller, owner_id: i64) -> Result<(), PolicyError> {
    if caller.admin || caller.id == owner_id {
        Ok(())
    } else {
        Err(PolicyError::Forbidden("you may only view your own content"))
    }
}

/// Gate for deleting a document.
pub fn authorize_delete(
    caller: &Caller,
    owner_id: i64,
    status: ReviewStatus,
) -> Result<(), PolicyError> {
    if caller.admin {
        return Ok(());
    }
    if caller.id != owner_id {
        return Err(PolicyError::Forbidden(
            "you may only delete your own content",
        ));
    }
    if status == ReviewStatus::Approved {
        return Err(PolicyError::Forbidden(
            "approved content can only be deleted by an admin",
        ));
    }
    Ok(())
}

/// Resolved visibility for a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListScope {
    /// Restrict results to this writer; `None` means all writers.
    pub writer_id: Option<i64>,
    pub statuses: Vec<ReviewStatus>,
}

/// Resolves who sees what on list endpoints.
///
/// Writers only ever see their own content (a `writer` filter from them is
/// ignored). Admins see everything, except drafts stay hidden until the
/// status filter names `draft` explicitly.
pub fn resolve_list_scope(
    caller: &Caller,
    status_filter: Option<&str>,
    writer_filter: Option<i64>,
) -> Result<ListScope, PolicyError> {
    let statuses = match status_filter {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_status)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![],
    };

    if caller.admin {
        let statuses = if statuses.is_empty() {
            vec![
                ReviewStatus::Pending,
                ReviewStatus::Approved,
                ReviewStatus::Rejected,
            ]
        } else {
            statuses
        };
        Ok(ListScope {
            writer_id: writer_filter,
            statuses,
        })
    } else {
        let statuses = if statuses.is_empty() {
            vec![
                ReviewStatus::Draft,
                ReviewStatus::Pending,
                ReviewStatus::Approved,
                ReviewStatus::Rejected,
            ]
        } else {
            statuses
        };
        Ok(ListScope {
            writer_id: Some(caller.id),
            statuses,
        })
    }
}

/// The complete set of fields a caller may attempt to change on a station.
///
/// Anything outside this whitelist is rejected at deserialization; nothing
/// from the request body reaches persistence unchecked.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StationPatch {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "Topic must not be empty"))]
    pub topic: Option<String>,
    #[validate(length(min = 1, message = "Case description must not be empty"))]
    pub case_description: Option<String>,
    pub images: Option<Vec<String>>,
    pub marking_scheme: Option<Vec<MarkingSchemeSection>>,
    pub follow_ups: Option<Vec<FollowUp>>,
    pub total_marks: Option<f64>,
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
}

/// A station update with every rule applied, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct StationUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub case_description: Option<String>,
    pub images: Option<Vec<String>>,
    pub marking_scheme: Option<Vec<MarkingSchemeSection>>,
    pub follow_ups: Option<Vec<FollowUp>>,
    /// Recomputed total; `Some` exactly when the patch touched scoring data.
    pub total_marks: Option<f64>,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
}

/// Applies the mutation rules to a station patch.
///
/// When the patch touches the marking scheme, follow-ups, or total marks, the
/// scoring engine runs over the merged view (patch values over persisted
/// values) and the recomputed total replaces whatever the caller sent. Any
/// failure aborts the whole update.
pub fn resolve_station_update(
    caller: &Caller,
    station: &osce_station::Model,
    patch: StationPatch,
) -> Result<StationUpdate, PolicyError> {
    let (status, rejection_reason) = resolve_review_transition(
        caller,
        station.writer_id,
        station.status,
        station.rejection_reason.as_deref(),
        patch.status.as_deref(),
        patch.rejection_reason.as_deref(),
    )?;

    let scoring_touched = patch.marking_scheme.is_some()
        || patch.follow_ups.is_some()
        || patch.total_marks.is_some();

    let total_marks = if scoring_touched {
        let sections = patch
            .marking_scheme
            .as_deref()
            .unwrap_or(&station.marking_scheme.0);
        let follow_ups = patch.follow_ups.as_deref().unwrap_or(&station.follow_ups.0);
        scoring::validate_scoring_data(sections, follow_ups, patch.total_marks)?;
        Some(scoring::compute_total_marks(sections, follow_ups)?)
    } else {
        None
    };

    Ok(StationUpdate {
        title: patch.title,
        category: patch.category,
        subject: patch.subject,
        topic: patch.topic,
        case_description: patch.case_description,
        images: patch.images,
        marking_scheme: patch.marking_scheme,
        follow_ups: patch.follow_ups,
        total_marks,
        status,
        rejection_reason,
    })
}

/// The complete set of fields a caller may attempt to change on an SBA
/// submission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SubmissionPatch {
    #[validate(length(min = 1, message = "Question must not be empty"))]
    pub question: Option<String>,
    #[validate(length(min = 2, max = 5, message = "Between 2 and 5 answer options are required"))]
    pub options: Option<Vec<String>>,
    pub correct_option: Option<i32>,
    #[validate(length(min = 1, message = "Explanation must not be empty"))]
    pub explanation: Option<String>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "Topic must not be empty"))]
    pub topic: Option<String>,
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
}

/// A submission update with every rule applied, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionUpdate {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_option: Option<i32>,
    pub explanation: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
}

/// Applies the mutation rules to a submission patch.
pub fn resolve_submission_update(
    caller: &Caller,
    current: &submission::Model,
    patch: SubmissionPatch,
) -> Result<SubmissionUpdate, PolicyError> {
    let (status, rejection_reason) = resolve_review_transition(
        caller,
        current.writer_id,
        current.status,
        current.rejection_reason.as_deref(),
        patch.status.as_deref(),
        patch.rejection_reason.as_deref(),
    )?;

    Ok(SubmissionUpdate {
        question: patch.question,
        options: patch.options,
        correct_option: patch.correct_option,
        explanation: patch.explanation,
        category: patch.category,
        subject: patch.subject,
        topic: patch.topic,
        status,
        rejection_reason,
    })
}
