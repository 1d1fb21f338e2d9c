//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    error::FocusError,
    state::{AppState, PhaseController},
    utils::format_clock,
};
use super::responses::{ApiResponse, CycleSettings, HealthResponse, StatusResponse};

/// Accepted commands answer 200, rejected ones 409 with the unchanged cycle
pub type CommandResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Run a controller command and shape the HTTP response
fn dispatch<F>(state: &AppState, action: &str, message: &str, command: F) -> CommandResult
where
    F: FnOnce(&mut PhaseController) -> Result<(), FocusError>,
{
    match state.apply(action, command) {
        Ok(cycle) => {
            info!("{} endpoint called - {}", action, message);
            Ok(Json(ApiResponse::ok(message.to_string(), cycle)))
        }
        Err(e) => {
            warn!("{} endpoint rejected: {}", action, e);
            Err((
                StatusCode::CONFLICT,
                Json(ApiResponse::rejected(e.to_string(), state.snapshot())),
            ))
        }
    }
}

/// Handle POST /cycle - Start a fresh cycle with a work interval
pub async fn start_cycle_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "start-cycle", "Focus cycle started", |c| c.start_cycle())
}

/// Handle POST /work - Start a single work interval
pub async fn start_work_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "start-work", "Work interval started", |c| c.start_single_work())
}

/// Handle POST /short-break - Start a short break
pub async fn start_short_break_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "short-break", "Short break started", |c| c.start_short_break())
}

/// Handle POST /long-break - Start a long break
pub async fn start_long_break_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "long-break", "Long break started", |c| c.start_long_break())
}

/// Handle POST /pause - Pause the running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "pause", "Countdown paused", |c| c.pause())
}

/// Handle POST /resume - Resume a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "resume", "Countdown resumed", |c| c.resume())
}

/// Handle POST /finish - Abandon the current phase and return to idle
pub async fn finish_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "finish", "Phase finished manually", |c| c.finish_now())
}

/// Handle POST /continue - Start the next work interval after a break
pub async fn continue_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "continue", "Next work interval started", |c| c.confirm_continue())
}

/// Handle POST /decline - Stop the cycle after a break
pub async fn decline_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    dispatch(&state, "decline", "Cycle stopped", |c| c.decline_continue())
}

/// Handle GET /status - Return current cycle status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let cycle = state.snapshot();
    let config = state.cycle_config();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        remaining_display: format_clock(cycle.remaining_seconds),
        cycle,
        settings: CycleSettings {
            work_minutes: config.work_minutes(),
            short_break_minutes: config.short_break_minutes(),
            long_break_minutes: config.long_break_minutes(),
            work_intervals_per_long_break: config.work_intervals_per_long_break(),
        },
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream notifications as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let notifications = state.subscribe();

    let events = stream::unfold(notifications, |mut notifications| async move {
        loop {
            match notifications.recv().await {
                Ok(notification) => match Event::default().event(notification.kind()).json_data(notification) {
                    Ok(event) => return Some((Ok(event), notifications)),
                    Err(e) => warn!("Failed to encode notification: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, skipped {} notifications", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
