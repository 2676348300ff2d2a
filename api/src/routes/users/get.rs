use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::{Column as UserColumn, Entity as UserEntity};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

/// GET /users
///
/// List every account, ordered by username. Admin-only (enforced by the
/// route guard).
pub async fn list_users(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match UserEntity::find()
        .order_by_asc(UserColumn::Username)
        .all(db)
        .await
    {
        Ok(models) => {
            let response = UserListResponse {
                users: models.into_iter().map(UserResponse::from).collect(),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Users fetched successfully")),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserListResponse>::error(
                "Database error while listing users",
            )),
        ),
    }
}
