//! # users Routes Module
//!
//! Routes for the `/users` endpoint group. The whole group sits behind the
//! admin guard; it backs the review dashboard's writer pickers.
//!
//! - `GET /users` → `list_users`

pub mod get;

use axum::{Router, routing::get};

use crate::state::AppState;
use get::list_users;

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}
