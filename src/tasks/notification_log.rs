//! Notification rendering background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    state::{AppState, FocusEvent},
    utils::format_clock,
};

/// Background task that renders caller notifications to the log
pub async fn notification_log_task(state: Arc<AppState>) {
    info!("Starting notification log task");

    let mut notifications = state.subscribe();

    loop {
        match notifications.recv().await {
            Ok(FocusEvent::PhaseStarted { phase, duration_seconds }) => {
                info!("{} started ({})", phase, format_clock(duration_seconds));
            }
            Ok(FocusEvent::Tick { phase, remaining_seconds }) => {
                debug!("Time remaining ({}): {}", phase, format_clock(remaining_seconds));
            }
            Ok(FocusEvent::PhaseFinished { phase }) => {
                info!("Time is up for {}!", phase);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification log lagged, skipped {} notifications", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
