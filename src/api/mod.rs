//! HTTP API module
//!
//! Every click on the toolkit maps to a POST; the rendered shell is a GET.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/shell", get(shell_handler))
        .route("/navigate/:view", post(navigate_handler))
        .route("/back", post(back_handler))
        .route("/sos", post(sos_handler))
        .route("/battery/power-save", post(power_save_handler))
        .route("/contacts", get(contacts_handler))
        // Flashlight
        .route("/flashlight/toggle", post(flashlight_toggle_handler))
        .route("/flashlight/mode/:mode", post(flashlight_mode_handler))
        .route("/flashlight/brightness", post(flashlight_brightness_handler))
        // Radio
        .route("/radio/power", post(radio_power_handler))
        .route("/radio/scan", post(radio_scan_handler))
        .route("/radio/volume", post(radio_volume_handler))
        .route("/radio/tune", post(radio_tune_handler))
        .route("/radio/channel/:index", post(radio_channel_handler))
        // Supplies
        .route("/supplies", get(supplies_handler))
        .route("/supplies/category", post(supply_category_handler))
        .route("/supplies/:id/toggle", post(supply_toggle_handler))
        // Guides
        .route("/manual/topic/:id", post(manual_topic_handler))
        .route("/manual/close", post(manual_close_handler))
        .route("/firstaid/topic/:id", post(first_aid_topic_handler))
        .route("/firstaid/close", post(first_aid_close_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
