use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::osce_station::{
    self, Entity as StationEntity, FollowUpList, ImageList, MarkingScheme,
};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use services::policy::{self, StationPatch};
use validator::Validate;

use super::common::StationResponse;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{caller_from, policy_error_status, rejection_reason_missing};
use crate::state::AppState;

/// PUT /osce-stations/{station_id}
///
/// Apply a partial update. Which fields take effect depends on the caller and
/// the station's current status (see the policy rules); whenever the patch
/// touches the marking scheme, follow-ups, or total marks, the scoring engine
/// re-validates the merged view and the stored total is recomputed. A scoring
/// failure aborts the whole update.
///
/// ### Responses
/// - `200 OK` with the updated station
/// - `400 Bad Request` on validation, status, or scoring failure
/// - `403 Forbidden` on an ownership or state violation
/// - `404 Not Found` for an unknown id
pub async fn edit_station(
    State(app_state): State<AppState>,
    Path(station_id): Path<i64>,
    user: AuthUser,
    Json(patch): Json<StationPatch>,
) -> impl IntoResponse {
    if let Err(validation_errors) = patch.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StationResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    let current = match StationEntity::find_by_id(station_id).one(db).await {
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

    if caller.admin
        && rejection_reason_missing(
            patch.status.as_deref(),
            patch.rejection_reason.as_deref(),
            current.rejection_reason.as_deref(),
        )
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StationResponse>::error(
                "A rejection reason is required when rejecting content",
            )),
        );
    }

    let update = match policy::resolve_station_update(&caller, &current, patch) {
        Ok(update) => update,
        Err(e) => {
            return (
                policy_error_status(&e),
                Json(ApiResponse::<StationResponse>::error(e.to_string())),
            );
        }
    };

    let mut active: osce_station::ActiveModel = current.into();
    if let Some(title) = update.title {
        active.title = Set(title);
    }
    if let Some(category) = update.category {
        active.category = Set(category);
    }
    if let Some(subject) = update.subject {
        active.subject = Set(subject);
    }
    if let Some(topic) = update.topic {
        active.topic = Set(topic);
    }
    if let Some(case_description) = update.case_description {
        active.case_description = Set(case_description);
    }
    if let Some(images) = update.images {
        active.images = Set(ImageList(images));
    }
    if let Some(marking_scheme) = update.marking_scheme {
        active.marking_scheme = Set(MarkingScheme(marking_scheme));
    }
    if let Some(follow_ups) = update.follow_ups {
        active.follow_ups = Set(FollowUpList(follow_ups));
    }
    if let Some(total_marks) = update.total_marks {
        active.total_marks = Set(total_marks);
    }
    active.status = Set(update.status);
    active.rejection_reason = Set(update.rejection_reason);
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StationResponse::from(updated),
                "OSCE station updated successfully",
            )),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StationResponse>::error(
                "Failed to update OSCE station",
            )),
        ),
    }
}
