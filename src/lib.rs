//! Focus Cycle - A work/break focus timer driven over HTTP
//!
//! This library provides a generation-tagged countdown timer and the phase
//! controller that sequences work intervals, short breaks and long breaks
//! on top of it.

pub mod config;
pub mod error;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, CycleConfig};
pub use error::FocusError;
pub use timer::{CountdownTimer, TimerEvent};
pub use state::{AppState, FocusEvent, Phase, PhaseController, StatusSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
