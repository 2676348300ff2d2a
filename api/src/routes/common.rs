use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use services::policy::{Caller, PolicyError};

use crate::auth::claims::AuthUser;

/// User shape returned by the auth and user-listing endpoints.
#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::models::user::Model> for UserResponse {
    fn from(user: db::models::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            admin: user.admin,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters shared by the content list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated status filter, e.g. `pending,rejected`.
    pub status: Option<String>,
    /// Admin-only writer filter; ignored for writers.
    pub writer_id: Option<i64>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

pub fn page_bounds(query: &ListQuery) -> (u64, u64) {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page)
}

pub fn caller_from(user: &AuthUser) -> Caller {
    Caller {
        id: user.0.sub,
        admin: user.0.admin,
    }
}

/// Maps a policy rejection to its transport status code; the message comes
/// from the error itself.
pub fn policy_error_status(err: &PolicyError) -> StatusCode {
    match err {
        PolicyError::Forbidden(_) => StatusCode::FORBIDDEN,
        PolicyError::InvalidStatus(_) | PolicyError::Scoring(_) => StatusCode::BAD_REQUEST,
    }
}

/// A rejection must leave a reason behind, either supplied with the patch or
/// already stored on the document. Only admins can reject, so the check is
/// theirs alone; writer-requested statuses are coerced by the policy instead.
pub fn rejection_reason_missing(
    requested_status: Option<&str>,
    requested_reason: Option<&str>,
    current_reason: Option<&str>,
) -> bool {
    requested_status
        .map(|s| s.trim().eq_ignore_ascii_case("rejected"))
        .unwrap_or(false)
        && requested_reason.is_none()
        && current_reason.is_none()
}
