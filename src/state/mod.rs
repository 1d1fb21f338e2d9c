//! State management module
//!
//! This module contains the phase model, the cycle counters, the controller
//! that sequences phases, and the shared service state that wraps it.

pub mod phase;
pub mod cycle_state;
pub mod notification;
pub mod controller;
pub mod app_state;

// Re-export main types
pub use phase::Phase;
pub use cycle_state::{CycleState, StatusSnapshot};
pub use notification::FocusEvent;
pub use controller::PhaseController;
pub use app_state::AppState;
