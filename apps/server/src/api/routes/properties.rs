//! Listing catalog routes

use crate::api::handlers::properties;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes mounted under `/api/properties`.
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/form", post(properties::create_property_from_form))
        .route("/auto", post(properties::generate_properties))
        .route("/seed", post(properties::seed_properties))
        .route("/:id", get(properties::get_property))
}
