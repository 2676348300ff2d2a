use db::models::submission::Model as Submission;
use serde::Serialize;

/// Submission shape returned by every `/submissions` endpoint.
#[derive(Debug, Serialize, Default)]
pub struct SubmissionResponse {
    pub id: i64,
    pub writer_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub explanation: String,
    pub category: String,
    pub subject: String,
    pub topic: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            writer_id: submission.writer_id,
            question: submission.question,
            options: submission.options.0,
            correct_option: submission.correct_option,
            explanation: submission.explanation,
            category: submission.category,
            subject: submission.subject,
            topic: submission.topic,
            status: submission.status.to_string(),
            rejection_reason: submission.rejection_reason,
            created_at: submission.created_at.to_rfc3339(),
            updated_at: submission.updated_at.to_rfc3339(),
        }
    }
}

/// Checks that the correct-answer index points at a real, non-blank option.
///
/// Returns the user-facing error message on failure; used for both creation
/// and the merged view on update.
pub fn check_options(options: &[String], correct_option: i32) -> Result<(), &'static str> {
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err("Answer options must not be empty");
    }
    if correct_option < 0 || correct_option as usize >= options.len() {
        return Err("Correct option must reference one of the provided options");
    }
    Ok(())
}
