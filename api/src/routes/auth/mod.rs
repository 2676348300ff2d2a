//! # auth Routes Module
//!
//! Routes for the `/auth` endpoint group.
//!
//! - `POST /auth/register` → `register`
//! - `POST /auth/login` → `login`
//! - `GET /auth/me` → `get_me`

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use get::get_me;
use post::{login, register};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me))
}
