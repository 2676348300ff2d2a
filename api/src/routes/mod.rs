//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware:
//! - `/health` → liveness probe (public)
//! - `/auth` → registration, login, current-user lookup
//! - `/submissions` → SBA question workflow (authenticated)
//! - `/osce-stations` → OSCE station workflow (authenticated)
//! - `/penalties` → writer penalties (reads authenticated, writes admin-only)
//! - `/users` → user listing for the review dashboard (admin-only)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod auth;
pub mod common;
pub mod health;
pub mod osce_stations;
pub mod penalties;
pub mod submissions;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest(
            "/submissions",
            submissions::submission_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/osce-stations",
            osce_stations::osce_station_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/penalties",
            penalties::penalty_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/users", users::users_routes().route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}
