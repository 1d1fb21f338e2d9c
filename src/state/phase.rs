//! Phase of the focus cycle

use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of the cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
    #[default]
    Idle,
    /// A break ended; waiting for the caller to confirm the next work interval
    AwaitingConfirmation,
}

impl Phase {
    /// Whether this phase is backed by a countdown
    pub fn is_timed(&self) -> bool {
        matches!(self, Phase::Work | Phase::ShortBreak | Phase::LongBreak)
    }

    /// Short or long break
    pub fn is_break(&self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Work => "WORK",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
            Phase::Idle => "IDLE",
            Phase::AwaitingConfirmation => "AWAITING CONFIRMATION",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_phases() {
        assert!(Phase::Work.is_timed());
        assert!(Phase::ShortBreak.is_timed());
        assert!(Phase::LongBreak.is_timed());
        assert!(!Phase::Idle.is_timed());
        assert!(!Phase::AwaitingConfirmation.is_timed());
        assert!(!Phase::Work.is_break());
        assert!(Phase::LongBreak.is_break());
    }

    #[test]
    fn test_serialized_names() {
        let names: Vec<String> = [
            Phase::Work,
            Phase::ShortBreak,
            Phase::LongBreak,
            Phase::Idle,
            Phase::AwaitingConfirmation,
        ]
        .iter()
        .map(|phase| serde_json::to_string(phase).unwrap())
        .collect();
        assert_eq!(
            names,
            vec![
                "\"work\"",
                "\"short_break\"",
                "\"long_break\"",
                "\"idle\"",
                "\"awaiting_confirmation\"",
            ]
        );
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
