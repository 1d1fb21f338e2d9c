//! Cycle counters and the status snapshot exposed to callers

use serde::{Deserialize, Serialize};

use super::Phase;

/// Mutable cycle record, owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleState {
    pub phase: Phase,
    /// Lifetime count, never reset
    pub completed_work_intervals: u64,
    /// Count since the last long break
    pub work_intervals_this_cycle: u64,
    /// Last remaining time reported by the timer
    pub remaining_seconds: u64,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished work interval. Returns true when it earns a long
    /// break, in which case the per-cycle count is already reset.
    pub fn record_work_interval(&mut self, per_long_break: u64) -> bool {
        self.completed_work_intervals += 1;
        self.work_intervals_this_cycle += 1;
        if self.work_intervals_this_cycle % per_long_break == 0 {
            self.work_intervals_this_cycle = 0;
            true
        } else {
            false
        }
    }

    pub fn reset_cycle(&mut self) {
        self.work_intervals_this_cycle = 0;
    }
}

/// Point-in-time view of the cycle for callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub phase: Phase,
    pub completed_work_intervals: u64,
    pub work_intervals_this_cycle: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub is_paused: bool,
}
