//! Countdown timer module

pub mod countdown;

pub use countdown::{CountdownTimer, TimerEvent, TimerStatus, TICK_PERIOD};
