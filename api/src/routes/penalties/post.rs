use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::penalty::Model as Penalty;
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use serde::Deserialize;
use validator::Validate;

use super::common::PenaltyResponse;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePenaltyRequest {
    pub writer_id: i64,

    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,

    #[validate(range(exclusive_min = 0.0, message = "Penalty amount must be positive"))]
    pub amount: f64,
}

/// POST /penalties
///
/// Issue a penalty against a writer. Admin-only (enforced by the route
/// guard).
///
/// ### Responses
/// - `201 Created` with the new penalty
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` when the writer does not exist
pub async fn create_penalty(
    State(app_state): State<AppState>,
    Json(req): Json<CreatePenaltyRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<PenaltyResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match UserEntity::find_by_id(req.writer_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<PenaltyResponse>::error(format!(
                    "Writer {} not found.",
                    req.writer_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PenaltyResponse>::error(
                    "Database error while checking writer",
                )),
            );
        }
    }

    match Penalty::create(db, req.writer_id, &req.reason, req.amount).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                PenaltyResponse::from(created),
                "Penalty created successfully",
            )),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<PenaltyResponse>::error("Failed to create penalty")),
        ),
    }
}
