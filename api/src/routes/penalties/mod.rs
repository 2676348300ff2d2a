//! # penalties Routes Module
//!
//! Routes for the `/penalties` endpoint group. Reads are available to any
//! authenticated user (writers see their own penalties); mutations are
//! admin-only.
//!
//! - `GET /penalties` → `list_penalties`
//! - `POST /penalties` → `create_penalty` (admin)
//! - `PUT /penalties/{penalty_id}` → `edit_penalty` (admin)
//! - `DELETE /penalties/{penalty_id}` → `delete_penalty` (admin)

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};

use crate::auth::guards::allow_admin;
use crate::state::AppState;
use delete::delete_penalty;
use get::list_penalties;
use post::create_penalty;
use put::edit_penalty;

pub fn penalty_routes() -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_penalty))
        .route("/{penalty_id}", put(edit_penalty).delete(delete_penalty))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/", get(list_penalties))
        .merge(admin_routes)
}
