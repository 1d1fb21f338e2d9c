//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::StatusSnapshot;

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub cycle: StatusSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, cycle: StatusSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            cycle,
        }
    }

    /// Create a response for an accepted command
    pub fn ok(message: String, cycle: StatusSnapshot) -> Self {
        Self::new("ok".to_string(), message, cycle)
    }

    /// Create a response for a rejected command
    pub fn rejected(message: String, cycle: StatusSnapshot) -> Self {
        Self::new("rejected".to_string(), message, cycle)
    }
}

/// Durations the service was started with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSettings {
    pub work_minutes: u64,
    pub short_break_minutes: u64,
    pub long_break_minutes: u64,
    pub work_intervals_per_long_break: u64,
}

/// Status response with display time and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub cycle: StatusSnapshot,
    /// Remaining time as "MM:SS"
    pub remaining_display: String,
    pub settings: CycleSettings,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
