use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::osce_station::{Entity as StationEntity, Model as OsceStation};
use sea_orm::EntityTrait;
use services::policy;

use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};
use crate::routes::common::{caller_from, policy_error_status};
use crate::state::AppState;

/// DELETE /osce-stations/{station_id}
///
/// Admins may delete any station; the owning writer may delete theirs unless
/// it has been approved.
pub async fn delete_station(
    State(app_state): State<AppState>,
    Path(station_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let station = match StationEntity::find_by_id(station_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("OSCE station not found")),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(
                    "Database error while loading OSCE station",
                )),
            );
        }
    };

    let caller = caller_from(&user);
    if let Err(e) = policy::authorize_delete(&caller, station.writer_id, station.status) {
        return (
            policy_error_status(&e),
            Json(ApiResponse::<Empty>::error(e.to_string())),
        );
    }

    match OsceStation::delete_by_id(db, station_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "OSCE station deleted successfully")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("OSCE station not found")),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Failed to delete OSCE station")),
        ),
    }
}
