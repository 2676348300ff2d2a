use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::osce_station::{
    FollowUp, MarkingSchemeSection, Model as OsceStation, NewOsceStation,
};
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use serde::Deserialize;
use services::{policy, scoring};
use validator::Validate;

use super::common::StationResponse;
use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{caller_from, policy_error_status};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,

    #[validate(length(min = 1, message = "Case description is required"))]
    pub case_description: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub marking_scheme: Vec<MarkingSchemeSection>,

    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,

    /// Optional client-side total; checked against the computed sum.
    pub total_marks: Option<f64>,

    /// `draft` to keep the station private; anything else submits it.
    pub status: Option<String>,

    /// Admin-only: author on behalf of this writer.
    pub writer_id: Option<i64>,
}

/// POST /osce-stations
///
/// Create an OSCE station. The marking scheme and follow-ups are validated
/// and the stored total is always the computed sum; a client-supplied
/// `total_marks` that disagrees with the computed sum fails the request.
///
/// ### Responses
/// - `201 Created` with the new station
/// - `400 Bad Request` on validation or scoring failure
/// - `404 Not Found` when the target writer does not exist
pub async fn create_station(
    State(app_state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateStationRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StationResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let caller = caller_from(&user);
    let (writer_id, status) =
        match policy::resolve_create(&caller, req.writer_id, req.status.as_deref()) {
            Ok(resolved) => resolved,
            Err(e) => {
                return (
                    policy_error_status(&e),
                    Json(ApiResponse::<StationResponse>::error(e.to_string())),
                );
            }
        };

    if let Err(e) = scoring::validate_scoring_data(&req.marking_scheme, &req.follow_ups, req.total_marks)
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StationResponse>::error(e.to_string())),
        );
    }
    let total_marks = match scoring::compute_total_marks(&req.marking_scheme, &req.follow_ups) {
        Ok(total) => total,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<StationResponse>::error(e.to_string())),
            );
        }
    };

    let db = app_state.db();

    if writer_id != caller.id {
        match UserEntity::find_by_id(writer_id).one(db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<StationResponse>::error(format!(
                        "Writer {} not found.",
                        writer_id
                    ))),
                );
            }
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<StationResponse>::error(
                        "Database error while checking writer",
                    )),
                );
            }
        }
    }

    let new_station = NewOsceStation {
        writer_id,
        title: req.title,
        category: req.category,
        subject: req.subject,
        topic: req.topic,
        case_description: req.case_description,
        images: req.images,
        marking_scheme: req.marking_scheme,
        follow_ups: req.follow_ups,
        total_marks,
        status,
    };

    match OsceStation::create(db, new_station).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                StationResponse::from(created),
                "OSCE station created successfully",
            )),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<StationResponse>::error(
                "Failed to create OSCE station",
            )),
        ),
    }
}
