use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::{Entity as SubmissionEntity, Model as Submission};
use sea_orm::EntityTrait;
use services::policy;

use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};
use crate::routes::common::{caller_from, policy_error_status};
use crate::state::AppState;

/// DELETE /submissions/{submission_id}
///
/// Admins may delete any submission; the owning writer may delete theirs
/// unless it has been approved.
pub async fn delete_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let submission = match SubmissionEntity::find_by_id(submission_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("Submission not found")),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(
                    "Database error while loading submission",
                )),
            );
        }
    };

    let caller = caller_from(&user);
    if let Err(e) = policy::authorize_delete(&caller, submission.writer_id, submission.status) {
        return (
            policy_error_status(&e),
            Json(ApiResponse::<Empty>::error(e.to_string())),
        );
    }

    match Submission::delete_by_id(db, submission_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Submission deleted successfully")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Submission not found")),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Failed to delete submission")),
        ),
    }
}
