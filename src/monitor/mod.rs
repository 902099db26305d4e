//! Background monitor that tracks the death counter of a running game

pub mod service;
pub mod state;

pub use service::{MonitorService, PollIntervals, PollOutcome};
pub use state::{MonitorSnapshot, SharedState, NO_GAME_DETECTED};
