//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod phase_driver;
pub mod notification_log;

// Re-export main functions
pub use phase_driver::phase_driver_task;
pub use notification_log::notification_log_task;
