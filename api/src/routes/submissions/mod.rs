//! # submissions Routes Module
//!
//! Routes for the `/submissions` endpoint group (SBA questions).
//!
//! - `GET /submissions` → `list_submissions`
//! - `GET /submissions/{submission_id}` → `get_submission`
//! - `POST /submissions` → `create_submission`
//! - `PUT /submissions/{submission_id}` → `edit_submission`
//! - `DELETE /submissions/{submission_id}` → `delete_submission`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{Router, routing::get};

use crate::state::AppState;
use delete::delete_submission;
use get::{get_submission, list_submissions};
use post::create_submission;
use put::edit_submission;

pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route(
            "/{submission_id}",
            get(get_submission).put(edit_submission).delete(delete_submission),
        )
}
