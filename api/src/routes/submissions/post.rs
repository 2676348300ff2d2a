use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::submission::{Model as Submission, NewSubmission};
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use serde::Deserialize;
use services::policy;
use validator::Validate;

use super::common::{SubmissionResponse, check_options};
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{caller_from, policy_error_status};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateSubmissionRequest {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,

    #[validate(length(min = 2, max = 5, message = "Between 2 and 5 answer options are required"))]
    pub options: Vec<String>,

    pub correct_option: i32,

    #[validate(length(min = 1, message = "Explanation is required"))]
    pub explanation: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,

    /// `draft` to keep the question private; anything else submits it.
    pub status: Option<String>,

    /// Admin-only: author on behalf of this writer.
    pub writer_id: Option<i64>,
}

/// POST /submissions
///
/// Create an SBA question. Writers author for themselves; admins may author
/// on behalf of a writer by supplying `writer_id`.
///
/// ### Responses
/// - `201 Created` with the new submission
/// - `400 Bad Request` on validation failure or an invalid status
/// - `404 Not Found` when the target writer does not exist
pub async fn create_submission(
    State(app_state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateSubmissionRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    if let Err(message) = check_options(&req.options, req.correct_option) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(message)),
        );
    }

    let caller = caller_from(&user);
    let (writer_id, status) =
        match policy::resolve_create(&caller, req.writer_id, req.status.as_deref()) {
            Ok(resolved) => resolved,
            Err(e) => {
                return (
                    policy_error_status(&e),
                    Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
                );
            }
        };

    let db = app_state.db();

    if writer_id != caller.id {
        match UserEntity::find_by_id(writer_id).one(db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<SubmissionResponse>::error(format!(
                        "Writer {} not found.",
                        writer_id
                    ))),
                );
            }
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<SubmissionResponse>::error(
                        "Database error while checking writer",
                    )),
                );
            }
        }
    }

    let new_submission = NewSubmission {
        writer_id,
        question: req.question,
        options: req.options,
        correct_option: req.correct_option,
        explanation: req.explanation,
        category: req.category,
        subject: req.subject,
        topic: req.topic,
        status,
    };

    match Submission::create(db, new_submission).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SubmissionResponse::from(created),
                "Submission created successfully",
            )),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionResponse>::error(
                "Failed to create submission",
            )),
        ),
    }
}
