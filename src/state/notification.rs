//! Notifications emitted to callers

use serde::{Deserialize, Serialize};

use super::Phase;

/// Caller-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FocusEvent {
    PhaseStarted { phase: Phase, duration_seconds: u64 },
    Tick { phase: Phase, remaining_seconds: u64 },
    PhaseFinished { phase: Phase },
}

impl FocusEvent {
    /// SSE event name
    pub fn kind(&self) -> &'static str {
        match self {
            FocusEvent::PhaseStarted { .. } => "phase_started",
            FocusEvent::Tick { .. } => "tick",
            FocusEvent::PhaseFinished { .. } => "phase_finished",
        }
    }
}
