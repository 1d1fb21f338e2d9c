//! Error types for the focus cycle

use thiserror::Error;

/// Errors produced by the timer and the phase controller.
///
/// Every rejection is synchronous and leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
    /// A command the current phase or timer state does not allow
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A non-positive duration or threshold
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FocusError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FocusError::InvalidCommand(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        FocusError::Configuration(message.into())
    }
}
