use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::penalty::{self, Entity as PenaltyEntity};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde::Deserialize;
use validator::Validate;

use super::common::PenaltyResponse;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePenaltyRequest {
    #[validate(length(min = 1, message = "Reason must not be empty"))]
    pub reason: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Penalty amount must be positive"))]
    pub amount: Option<f64>,
}

/// PUT /penalties/{penalty_id}
///
/// Update a penalty's reason or amount. Admin-only (enforced by the route
/// guard).
pub async fn edit_penalty(
    State(app_state): State<AppState>,
    Path(penalty_id): Path<i64>,
    Json(req): Json<UpdatePenaltyRequest>,
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

    let current = match PenaltyEntity::find_by_id(penalty_id).one(db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<PenaltyResponse>::error("Penalty not found")),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PenaltyResponse>::error(
                    "Database error while loading penalty",
                )),
            );
        }
    };

    let mut active: penalty::ActiveModel = current.into();
    if let Some(reason) = req.reason {
        active.reason = Set(reason);
    }
    if let Some(amount) = req.amount {
        active.amount = Set(amount);
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PenaltyResponse::from(updated),
                "Penalty updated successfully",
            )),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<PenaltyResponse>::error("Failed to update penalty")),
        ),
    }
}
