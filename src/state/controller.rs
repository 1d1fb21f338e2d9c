//! Phase cycle controller
//!
//! Owns the cycle counters and the countdown timer, translates caller
//! commands into timer operations and reacts to timer events by moving to
//! the next phase:
//!
//! ```text
//!  Idle ──start──► Work ──finished──► ShortBreak | LongBreak ──finished──► AwaitingConfirmation
//!                   ▲                                                        │         │
//!                   └──────────────────── confirm_continue ──────────────────┘         │
//!  Idle ◄──────────────────────────────── decline_continue ────────────────────────────┘
//! ```

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    config::CycleConfig,
    error::FocusError,
    timer::{CountdownTimer, TimerEvent},
};
use super::{CycleState, FocusEvent, Phase, StatusSnapshot};

/// State machine sequencing work intervals and breaks
#[derive(Debug)]
pub struct PhaseController {
    config: CycleConfig,
    cycle: CycleState,
    timer: CountdownTimer,
    notifications: broadcast::Sender<FocusEvent>,
}

impl PhaseController {
    /// Create an idle controller driving `timer`
    pub fn new(
        config: CycleConfig,
        timer: CountdownTimer,
        notifications: broadcast::Sender<FocusEvent>,
    ) -> Self {
        Self {
            config,
            cycle: CycleState::new(),
            timer,
            notifications,
        }
    }

    /// Begin a fresh cycle with a work interval
    pub fn start_cycle(&mut self) -> Result<(), FocusError> {
        self.ensure_can_start(Phase::Work)?;
        info!("Starting focus cycle");
        self.cycle.reset_cycle();
        self.enter(Phase::Work)
    }

    /// Run one work interval outside of an ongoing cycle
    pub fn start_single_work(&mut self) -> Result<(), FocusError> {
        self.ensure_can_start(Phase::Work)?;
        info!("Starting single work interval");
        self.cycle.reset_cycle();
        self.enter(Phase::Work)
    }

    /// Start a standalone short break from idle
    pub fn start_short_break(&mut self) -> Result<(), FocusError> {
        self.ensure_can_start(Phase::ShortBreak)?;
        self.enter(Phase::ShortBreak)
    }

    /// Start a standalone long break from idle
    pub fn start_long_break(&mut self) -> Result<(), FocusError> {
        self.ensure_can_start(Phase::LongBreak)?;
        self.enter(Phase::LongBreak)
    }

    /// Pause the running countdown, recording the remaining time
    pub fn pause(&mut self) -> Result<(), FocusError> {
        if !self.timer.is_running() {
            return Err(self.reject(format!("no countdown to pause during {}", self.cycle.phase)));
        }
        if self.timer.is_paused() {
            return Err(self.reject("countdown is already paused"));
        }

        self.timer.pause();
        self.cycle.remaining_seconds = self.timer.remaining_seconds();
        info!("{} paused with {}s remaining", self.cycle.phase, self.cycle.remaining_seconds);
        Ok(())
    }

    /// Resume a paused countdown from the recorded remaining time
    pub fn resume(&mut self) -> Result<(), FocusError> {
        if !self.timer.is_running() {
            return Err(self.reject(format!("no countdown to resume during {}", self.cycle.phase)));
        }
        if !self.timer.is_paused() {
            return Err(self.reject("countdown is not paused"));
        }

        self.timer.resume();
        info!("{} resumed with {}s remaining", self.cycle.phase, self.cycle.remaining_seconds);
        Ok(())
    }

    /// Abandon the current phase and return to idle.
    ///
    /// The lifetime work count is kept; the per-cycle count is reset.
    pub fn force_stop(&mut self) -> Result<(), FocusError> {
        if !self.cycle.phase.is_timed() {
            return Err(self.reject(format!("nothing to finish during {}", self.cycle.phase)));
        }

        info!("{} finished manually", self.cycle.phase);
        self.reset_to_idle();
        Ok(())
    }

    /// Alias of [`force_stop`](Self::force_stop)
    pub fn finish_now(&mut self) -> Result<(), FocusError> {
        self.force_stop()
    }

    /// Start the next work interval after a break
    pub fn confirm_continue(&mut self) -> Result<(), FocusError> {
        self.ensure_awaiting("confirm")?;
        info!("Continuing cycle with next work interval");
        self.enter(Phase::Work)
    }

    /// Leave the cycle after a break, keeping both counters
    pub fn decline_continue(&mut self) -> Result<(), FocusError> {
        self.ensure_awaiting("decline")?;
        info!("Cycle declined, returning to idle");
        self.timer.stop();
        self.cycle.phase = Phase::Idle;
        self.cycle.remaining_seconds = 0;
        Ok(())
    }

    /// Unconditional stop used at process shutdown
    pub fn shutdown(&mut self) {
        info!("Shutting down focus cycle");
        self.reset_to_idle();
    }

    /// Apply one timer event. Events from a superseded countdown are
    /// dropped; returns whether the event was applied.
    pub fn handle_timer_event(&mut self, event: TimerEvent) -> bool {
        if !self.timer.is_current(event.generation()) {
            debug!("Ignoring stale timer event: {:?}", event);
            return false;
        }
        if !self.cycle.phase.is_timed() {
            warn!("Timer event {:?} received during {}", event, self.cycle.phase);
            return false;
        }

        match event {
            TimerEvent::Tick { remaining_seconds, .. } => {
                self.cycle.remaining_seconds = remaining_seconds;
                self.notify(FocusEvent::Tick {
                    phase: self.cycle.phase,
                    remaining_seconds,
                });
            }
            TimerEvent::Finished { .. } => self.on_phase_finished(),
        }
        true
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.cycle.phase
    }

    /// Lifetime count of finished work intervals
    pub fn completed_work_intervals(&self) -> u64 {
        self.cycle.completed_work_intervals
    }

    /// Work intervals finished since the last long break
    pub fn work_intervals_this_cycle(&self) -> u64 {
        self.cycle.work_intervals_this_cycle
    }

    /// Remaining time as of the last delivered tick
    pub fn remaining_seconds(&self) -> u64 {
        self.cycle.remaining_seconds
    }

    /// True while a countdown is armed, paused or not
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// True while the countdown is paused
    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Durations this controller was built with
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Point-in-time view of phase, counters and timer flags
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            phase: self.cycle.phase,
            completed_work_intervals: self.cycle.completed_work_intervals,
            work_intervals_this_cycle: self.cycle.work_intervals_this_cycle,
            remaining_seconds: self.cycle.remaining_seconds,
            is_running: self.timer.is_running(),
            is_paused: self.timer.is_paused(),
        }
    }

    fn on_phase_finished(&mut self) {
        let finished = self.cycle.phase;
        info!("Time is up for {}", finished);
        self.cycle.remaining_seconds = 0;
        self.notify(FocusEvent::PhaseFinished { phase: finished });

        if finished.is_break() {
            self.cycle.phase = Phase::AwaitingConfirmation;
            return;
        }

        let per_long_break = self.config.work_intervals_per_long_break();
        let long_break = self.cycle.record_work_interval(per_long_break);
        info!(
            "Work intervals completed: {} total, {}/{} this cycle",
            self.cycle.completed_work_intervals,
            if long_break { per_long_break } else { self.cycle.work_intervals_this_cycle },
            per_long_break
        );

        let next = if long_break { Phase::LongBreak } else { Phase::ShortBreak };
        if let Err(e) = self.enter(next) {
            warn!("Failed to start {}: {}", next, e);
            self.cycle.phase = Phase::Idle;
        }
    }

    /// Arm the timer for `phase` and announce it
    fn enter(&mut self, phase: Phase) -> Result<(), FocusError> {
        let duration_seconds = self
            .config
            .duration_secs(phase)
            .ok_or_else(|| FocusError::configuration(format!("{} has no duration", phase)))?;

        self.timer.start(duration_seconds)?;
        self.cycle.phase = phase;
        self.cycle.remaining_seconds = duration_seconds;
        info!("Starting {} for {}s", phase, duration_seconds);
        self.notify(FocusEvent::PhaseStarted { phase, duration_seconds });
        Ok(())
    }

    fn reset_to_idle(&mut self) {
        self.timer.stop();
        self.cycle.phase = Phase::Idle;
        self.cycle.reset_cycle();
        self.cycle.remaining_seconds = 0;
    }

    fn ensure_can_start(&self, phase: Phase) -> Result<(), FocusError> {
        if self.timer.is_running() {
            return Err(self.reject(format!(
                "cannot start {}: a {} countdown is already active",
                phase, self.cycle.phase
            )));
        }
        if self.cycle.phase != Phase::Idle {
            return Err(self.reject(format!(
                "cannot start {} during {}",
                phase, self.cycle.phase
            )));
        }
        Ok(())
    }

    fn ensure_awaiting(&self, action: &str) -> Result<(), FocusError> {
        if self.cycle.phase != Phase::AwaitingConfirmation {
            return Err(self.reject(format!(
                "nothing to {} during {}",
                action, self.cycle.phase
            )));
        }
        Ok(())
    }

    fn reject(&self, message: impl Into<String>) -> FocusError {
        let error = FocusError::invalid(message);
        warn!("{}", error);
        error
    }

    fn notify(&self, event: FocusEvent) {
        // No subscribers is fine; notifications are best effort.
        let _ = self.notifications.send(event);
    }
}
