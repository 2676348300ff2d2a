use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::osce_station::{Column as StationColumn, Entity as StationEntity};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use services::policy;

use super::common::StationResponse;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ListQuery, caller_from, page_bounds, policy_error_status};
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct StationListResponse {
    pub stations: Vec<StationResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /osce-stations
///
/// List stations visible to the caller. Writers only ever see their own;
/// admins see everything except drafts unless the status filter names
/// `draft`. Supports `status` (comma-separated), `writer_id` (admin only),
/// `page`, and `per_page`.
pub async fn list_stations(
    State(app_state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let caller = caller_from(&user);
    let scope =
        match policy::resolve_list_scope(&caller, query.status.as_deref(), query.writer_id) {
            Ok(scope) => scope,
            Err(e) => {
                return (
                    policy_error_status(&e),
                    Json(ApiResponse::<StationListResponse>::error(e.to_string())),
                );
            }
        };

    let (page, per_page) = page_bounds(&query);
    let db = app_state.db();

    let mut find = StationEntity::find()
        .filter(StationColumn::Status.is_in(scope.statuses))
        .order_by_desc(StationColumn::CreatedAt);
    if let Some(writer_id) = scope.writer_id {
        find = find.filter(StationColumn::WriterId.eq(writer_id));
    }

    let paginator = find.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StationListResponse>::error(
                    "Database error while counting OSCE stations",
                )),
            );
        }
    };

    match paginator.fetch_page(page - 1).await {
        Ok(models) => {
            let response = StationListResponse {
                stations: models.into_iter().map(StationResponse::from).collect(),
                page,
                per_page,
                total,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "OSCE stations fetched successfully")),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StationListResponse>::error(
                "Database error while listing OSCE stations",
            )),
        ),
    }
}

/// GET /osce-stations/{station_id}
///
/// Fetch a single station; admins and the owning writer only.
pub async fn get_station(
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
                Json(ApiResponse::<StationResponse>::error("OSCE station not found")),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<StationResponse>::error(
                    "Database error while loading OSCE station",
                )),
            );
        }
    };

    let caller = caller_from(&user);
    if let Err(e) = policy::authorize_read(&caller, station.writer_id) {
        return (
            policy_error_status(&e),
            Json(ApiResponse::<StationResponse>::error(e.to_string())),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            StationResponse::from(station),
            "OSCE station fetched successfully",
        )),
    )
}
