use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::{Column as SubmissionColumn, Entity as SubmissionEntity};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use services::policy;

use super::common::SubmissionResponse;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ListQuery, caller_from, page_bounds, policy_error_status};
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct SubmissionListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /submissions
///
/// List submissions visible to the caller. Writers only ever see their own;
/// admins see everything except drafts unless the status filter names
/// `draft`. Supports `status` (comma-separated), `writer_id` (admin only),
/// `page`, and `per_page`.
pub async fn list_submissions(
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
                    Json(ApiResponse::<SubmissionListResponse>::error(e.to_string())),
                );
            }
        };

    let (page, per_page) = page_bounds(&query);
    let db = app_state.db();

    let mut find = SubmissionEntity::find()
        .filter(SubmissionColumn::Status.is_in(scope.statuses))
        .order_by_desc(SubmissionColumn::CreatedAt);
    if let Some(writer_id) = scope.writer_id {
        find = find.filter(SubmissionColumn::WriterId.eq(writer_id));
    }

    let paginator = find.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionListResponse>::error(
                    "Database error while counting submissions",
                )),
            );
        }
    };

    match paginator.fetch_page(page - 1).await {
        Ok(models) => {
            let response = SubmissionListResponse {
                submissions: models.into_iter().map(SubmissionResponse::from).collect(),
                page,
                per_page,
                total,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Submissions fetched successfully")),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionListResponse>::error(
                "Database error while listing submissions",
            )),
        ),
    }
}

/// GET /submissions/{submission_id}
///
/// Fetch a single submission; admins and the owning writer only.
pub async fn get_submission(
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
    if let Err(e) = policy::authorize_read(&caller, submission.writer_id) {
        return (
            policy_error_status(&e),
            Json(ApiResponse::<SubmissionResponse>::error(e.to_string())),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SubmissionResponse::from(submission),
            "Submission fetched successfully",
        )),
    )
}
