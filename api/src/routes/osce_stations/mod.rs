//! # osce_stations Routes Module
//!
//! Routes for the `/osce-stations` endpoint group.
//!
//! - `GET /osce-stations` → `list_stations`
//! - `GET /osce-stations/{station_id}` → `get_station`
//! - `POST /osce-stations` → `create_station`
//! - `PUT /osce-stations/{station_id}` → `edit_station`
//! - `DELETE /osce-stations/{station_id}` → `delete_station`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{Router, routing::get};

use crate::state::AppState;
use delete::delete_station;
use get::{get_station, list_stations};
use post::create_station;
use put::edit_station;

pub fn osce_station_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations).post(create_station))
        .route(
            "/{station_id}",
            get(get_station).put(edit_station).delete(delete_station),
        )
}
