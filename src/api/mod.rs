//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

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
        .route("/cycle", post(start_cycle_handler))
        .route("/work", post(start_work_handler))
        .route("/short-break", post(start_short_break_handler))
        .route("/long-break", post(start_long_break_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/finish", post(finish_handler))
        .route("/continue", post(continue_handler))
        .route("/decline", post(decline_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
