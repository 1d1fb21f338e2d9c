//! Shared service state wrapping the phase controller

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::{
    config::CycleConfig,
    error::FocusError,
    timer::{CountdownTimer, TimerEvent},
};
use super::{FocusEvent, PhaseController, StatusSnapshot};

/// Capacity of the notification channel; slow subscribers lag past this
const NOTIFICATION_CAPACITY: usize = 256;

/// Service state shared between HTTP handlers and background tasks.
///
/// Every command and every timer event goes through the single controller
/// lock, so the controller only ever sees one control flow.
#[derive(Debug)]
pub struct AppState {
    controller: Mutex<PhaseController>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Caller notifications (phase started, tick, phase finished)
    pub notifications_tx: broadcast::Sender<FocusEvent>,
}

impl AppState {
    /// Create the state and the receiver the timer delivers its events on.
    /// The receiver must be handed to the phase driver task.
    pub fn new(
        config: CycleConfig,
        port: u16,
        host: String,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (notifications_tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        let (timer, timer_rx) = CountdownTimer::new();
        let controller = PhaseController::new(config, timer, notifications_tx.clone());

        let state = Self {
            controller: Mutex::new(controller),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            notifications_tx,
        };
        (state, timer_rx)
    }

    /// Run a command against the controller and record it as the last action
    pub fn apply<F>(&self, action: &str, command: F) -> Result<StatusSnapshot, FocusError>
    where
        F: FnOnce(&mut PhaseController) -> Result<(), FocusError>,
    {
        let mut controller = self.controller();
        command(&mut controller)?;
        let snapshot = controller.snapshot();
        drop(controller);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }
        Ok(snapshot)
    }

    /// Hand a timer event to the controller
    pub fn handle_timer_event(&self, event: TimerEvent) -> bool {
        self.controller().handle_timer_event(event)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.controller().snapshot()
    }

    pub fn cycle_config(&self) -> CycleConfig {
        *self.controller().config()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FocusEvent> {
        self.notifications_tx.subscribe()
    }

    /// Stop any countdown and release the ticking task
    pub fn shutdown(&self) {
        self.controller().shutdown();
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    fn controller(&self) -> MutexGuard<'_, PhaseController> {
        self.controller.lock().unwrap_or_else(|e: PoisonError<_>| {
            warn!("Controller lock was poisoned, recovering");
            e.into_inner()
        })
    }
}
