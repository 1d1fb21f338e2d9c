//! Configuration and CLI argument handling

use clap::Parser;

use crate::{error::FocusError, state::Phase};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "focus-cycle")]
#[command(about = "A work/break focus timer service driving a phase cycle over HTTP")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work interval length in minutes
    #[arg(short, long, default_value = "25")]
    pub work_minutes: u64,

    /// Short break length in minutes
    #[arg(short, long, default_value = "5")]
    pub short_break_minutes: u64,

    /// Long break length in minutes
    #[arg(short, long, default_value = "15")]
    pub long_break_minutes: u64,

    /// Completed work intervals that earn a long break
    #[arg(short = 'n', long, default_value = "4")]
    pub work_intervals_per_long_break: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validate the cycle durations into a [`CycleConfig`]
    pub fn cycle_config(&self) -> Result<CycleConfig, FocusError> {
        CycleConfig::new(
            self.work_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.work_intervals_per_long_break,
        )
    }
}

/// Validated cycle durations. All values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    work_minutes: u64,
    short_break_minutes: u64,
    long_break_minutes: u64,
    work_intervals_per_long_break: u64,
}

impl CycleConfig {
    pub fn new(
        work_minutes: u64,
        short_break_minutes: u64,
        long_break_minutes: u64,
        work_intervals_per_long_break: u64,
    ) -> Result<Self, FocusError> {
        let fields = [
            ("work minutes", work_minutes),
            ("short break minutes", short_break_minutes),
            ("long break minutes", long_break_minutes),
            ("work intervals per long break", work_intervals_per_long_break),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| *value == 0) {
            return Err(FocusError::configuration(format!("{} must be positive", name)));
        }
        if let Some((name, _)) = fields[..3].iter().find(|(_, minutes)| minutes.checked_mul(60).is_none()) {
            return Err(FocusError::configuration(format!("{} is too large", name)));
        }

        Ok(Self {
            work_minutes,
            short_break_minutes,
            long_break_minutes,
            work_intervals_per_long_break,
        })
    }

    pub fn work_minutes(&self) -> u64 {
        self.work_minutes
    }

    pub fn short_break_minutes(&self) -> u64 {
        self.short_break_minutes
    }

    pub fn long_break_minutes(&self) -> u64 {
        self.long_break_minutes
    }

    pub fn work_intervals_per_long_break(&self) -> u64 {
        self.work_intervals_per_long_break
    }

    /// Countdown length in seconds for a timed phase, `None` for
    /// `Idle` and `AwaitingConfirmation`.
    pub fn duration_secs(&self, phase: Phase) -> Option<u64> {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
            Phase::Idle | Phase::AwaitingConfirmation => return None,
        };
        Some(minutes * 60)
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            work_intervals_per_long_break: 4,
        }
    }
}
