//! Last observed game and death count, shared between the monitor and readers

use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Label reported while no supported game is running
pub const NO_GAME_DETECTED: &str = "No game detected";

/// A consistent view of the monitor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorSnapshot {
    pub deaths: i32,
    pub game: String,
}

impl MonitorSnapshot {
    pub fn is_game_detected(&self) -> bool {
        self.game != NO_GAME_DETECTED
    }
}

impl Default for MonitorSnapshot {
    fn default() -> Self {
        MonitorSnapshot {
            deaths: 0,
            game: NO_GAME_DETECTED.to_string(),
        }
    }
}

/// Cloneable handle to the monitor state.
///
/// The monitor is the only writer. Every read copies both fields under a
/// single read lock, so a reader never pairs a count with an unrelated label.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<MonitorSnapshot>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current state
    pub fn snapshot(&self) -> MonitorSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current `(deaths, game)` pair
    pub fn current_state(&self) -> (i32, String) {
        let MonitorSnapshot { deaths, game } = self.snapshot();
        (deaths, game)
    }

    /// Records the detected game. Returns whether the label changed.
    pub fn set_game(&self, game: &str) -> bool {
        self.update(|state| {
            if state.game == game {
                return false;
            }
            state.game = game.to_string();
            true
        })
    }

    /// Replaces both fields in one update and returns the state it replaced
    pub fn set(&self, deaths: i32, game: &str) -> MonitorSnapshot {
        self.update(|state| {
            std::mem::replace(
                state,
                MonitorSnapshot {
                    deaths,
                    game: game.to_string(),
                },
            )
        })
    }

    /// Returns to the "no game" label, keeping the last count.
    /// Returns whether the label changed.
    pub fn clear_game(&self) -> bool {
        self.set_game(NO_GAME_DETECTED)
    }

    fn update<R>(&self, apply: impl FnOnce(&mut MonitorSnapshot) -> R) -> R {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state)
    }
}
