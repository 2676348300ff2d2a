use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::penalty::Model as Penalty;

use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

/// DELETE /penalties/{penalty_id}
///
/// Remove a penalty. Admin-only (enforced by the route guard).
pub async fn delete_penalty(
    State(app_state): State<AppState>,
    Path(penalty_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match Penalty::delete_by_id(db, penalty_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Penalty deleted successfully")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Penalty not found")),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Failed to delete penalty")),
        ),
    }
}
