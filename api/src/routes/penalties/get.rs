use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::penalty::{Column as PenaltyColumn, Entity as PenaltyEntity};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use super::common::PenaltyResponse;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PenaltyListQuery {
    /// Admin-only writer filter; writers always get their own penalties.
    pub writer_id: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct PenaltyListResponse {
    pub penalties: Vec<PenaltyResponse>,
}

/// GET /penalties
///
/// Admins see all penalties (optionally filtered by `writer_id`); writers
/// see only their own.
pub async fn list_penalties(
    State(app_state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PenaltyListQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let writer_filter = if user.0.admin {
        query.writer_id
    } else {
        Some(user.0.sub)
    };

    let mut find = PenaltyEntity::find().order_by_desc(PenaltyColumn::CreatedAt);
    if let Some(writer_id) = writer_filter {
        find = find.filter(PenaltyColumn::WriterId.eq(writer_id));
    }

    match find.all(db).await {
        Ok(models) => {
            let response = PenaltyListResponse {
                penalties: models.into_iter().map(PenaltyResponse::from).collect(),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Penalties fetched successfully")),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<PenaltyListResponse>::error(
                "Database error while listing penalties",
            )),
        ),
    }
}
