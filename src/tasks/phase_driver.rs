//! Phase driver background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{state::AppState, timer::TimerEvent};

/// Background task that delivers countdown events to the phase controller.
///
/// Runs until the timer side of the channel is dropped.
pub async fn phase_driver_task(state: Arc<AppState>, mut timer_rx: mpsc::UnboundedReceiver<TimerEvent>) {
    info!("Starting phase driver task");

    while let Some(event) = timer_rx.recv().await {
        if !state.handle_timer_event(event) {
            debug!("Timer event not applied: {:?}", event);
        }
    }

    info!("Timer channel closed, phase driver task exiting");
}
