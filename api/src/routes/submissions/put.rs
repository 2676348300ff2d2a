use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::submission::{self, AnswerOptions, Entity as SubmissionEntity};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use services::policy::{self, SubmissionPatch};
use validator::Validate;

use super::common::{SubmissionResponse, check_options};
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{caller_from, policy_error_status, rejection_reason_missing};
use crate::state::AppState;

/// PUT /submissions/{submission_id}
///
/// Apply a partial update. Which fields take effect depends on the caller and
/// the submission's current status: admins may also set `status` and
/// `rejection_reason`; the owning writer may edit while the submission is a
/// draft or rejected (a rejected edit always resubmits it).
///
/// ### Responses
/// - `200 OK` with the updated submission
/// - `400 Bad Request` on validation failure or an invalid status
/// - `403 Forbidden` on an ownership or state violation
/// - `404 Not Found` for an unknown id
pub async fn edit_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    user: AuthUser,
    Json(patch): Json<SubmissionPatch>,
) -> impl IntoResponse {
    if let Err(validation_errors) = patch.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    let current = match SubmissionEntity::find_by_id(submission_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SubmissionResponse>::error("Submission not found")),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Database error while loading submission",
                )),
            );
        }
    };

    let caller = caller_from(&user);

    if caller.admin
        && rejection_reason_missing(
            patch.status.as_deref(),
            patch.rejection_reason.as_deref(),
            current.rejection_reason.as_deref(),
        )
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(
                "A rejection reason is required when rejecting content",
            )),
        );
    }

    let update = match policy::resolve_submission_update(&caller, &current, patch) {
        Ok(update) => update,
        Err(e) => {
            return (
                policy_error_status(&e),
                Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
            );
        }
    };

    // The answer key must stay consistent on the merged view.
    if update.options.is_some() || update.correct_option.is_some() {
        let options = update.options.as_deref().unwrap_or(&current.options.0);
        let correct = update.correct_option.unwrap_or(current.correct_option);
        if let Err(message) = check_options(options, correct) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<SubmissionResponse>::error(message)),
            );
        }
    }

    let mut active: submission::ActiveModel = current.into();
    if let Some(question) = update.question {
        active.question = Set(question);
    }
    if let Some(options) = update.options {
        active.options = Set(AnswerOptions(options));
    }
    if let Some(correct_option) = update.correct_option {
        active.correct_option = Set(correct_option);
    }
    if let Some(explanation) = update.explanation {
        active.explanation = Set(explanation);
    }
    if let Some(category) = update.category {
        active.category = Set(category);
    }
    if let Some(subject) = update.subject {
        active.subject = Set(subject);
    }
    if let Some(topic) = update.topic {
        active.topic = Set(topic);
    }
    active.status = Set(update.status);
    active.rejection_reason = Set(update.rejection_reason);
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from(updated),
                "Submission updated successfully",
            )),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionResponse>::error(
                "Failed to update submission",
            )),
        ),
    }
}
