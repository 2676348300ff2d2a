use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;

/// GET /auth/me
///
/// Returns the profile of the authenticated user.
///
/// ### Responses
/// - `200 OK` with the user
/// - `401 Unauthorized` without a valid token
/// - `404 Not Found` when the account no longer exists
pub async fn get_me(State(app_state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let db = app_state.db();

    match UserEntity::find_by_id(user.0.sub).one(db).await {
        Ok(Some(model)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(model),
                "User fetched successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<UserResponse>::error("User not found")),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(
                "Database error while loading user",
            )),
        ),
    }
}
