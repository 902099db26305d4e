//! Polling loop that keeps the shared state up to date

use crate::catalog::Catalog;
use crate::config::MonitorConfig;
use crate::core::types::MemoryResult;
use crate::memory::access::{ProcessMemory, ProcessPlatform};
use crate::memory::reader::read_i32;
use crate::memory::resolver::PointerChainResolver;
use crate::monitor::state::{MonitorSnapshot, SharedState};
use crate::process::locator::{ProcessLocator, ResolvedProcess};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Sleep intervals between polling iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// After a successful read
    pub poll: Duration,
    /// After no game was found or a read failed
    pub retry: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        PollIntervals {
            poll: Duration::from_millis(500),
            retry: Duration::from_secs(2),
        }
    }
}

impl From<&MonitorConfig> for PollIntervals {
    fn from(config: &MonitorConfig) -> Self {
        PollIntervals {
            poll: Duration::from_millis(config.poll_interval_ms),
            retry: Duration::from_millis(config.retry_interval_ms),
        }
    }
}

/// Result of one polling iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No supported game could be located
    Searching,
    /// A game was located but its counter could not be read
    ReadFailed,
    /// The counter was read
    Tracking { deaths: i32 },
}

/// Locates the running game, reads its death count, and publishes it.
///
/// Nothing but the shared state survives an iteration: the process is
/// located, opened, resolved and released again every time.
pub struct MonitorService<P: ProcessPlatform> {
    platform: P,
    catalog: Catalog,
    state: SharedState,
    intervals: PollIntervals,
}

impl<P: ProcessPlatform> MonitorService<P> {
    pub fn new(platform: P, catalog: Catalog, intervals: PollIntervals) -> Self {
        MonitorService {
            platform,
            catalog,
            state: SharedState::new(),
            intervals,
        }
    }

    /// Handle for readers of the monitor state
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Current `(deaths, game)` pair, without waiting on the monitor
    pub fn current_state(&self) -> (i32, String) {
        self.state.current_state()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        self.state.snapshot()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn intervals(&self) -> PollIntervals {
        self.intervals
    }

    /// How long to sleep after an iteration with this outcome
    pub fn delay_for(&self, outcome: PollOutcome) -> Duration {
        match outcome {
            PollOutcome::Tracking { .. } => self.intervals.poll,
            PollOutcome::Searching | PollOutcome::ReadFailed => self.intervals.retry,
        }
    }

    /// Runs a single locate → resolve → read → publish cycle. Blocks on OS
    /// calls; never fails.
    pub fn poll_once(&self) -> PollOutcome {
        let locator = ProcessLocator::new(&self.platform, &self.catalog);
        let process = match locator.locate() {
            Ok(process) => process,
            Err(error) => {
                if self.state.clear_game() {
                    info!(%error, "Game process closed or not found");
                } else {
                    trace!(%error, "No game process");
                }
                return PollOutcome::Searching;
            }
        };

        let game = process.target.name.as_str();
        let outcome = match self.read_deaths(&process) {
            Ok(deaths) => {
                let previous = self.state.set(deaths, game);
                if previous.game != game {
                    info!(game, pid = process.pid, "Found game");
                }
                if previous.deaths != deaths {
                    info!(game, deaths, "Deaths updated");
                }
                PollOutcome::Tracking { deaths }
            }
            Err(error) => {
                if self.state.set_game(game) {
                    info!(game, pid = process.pid, "Found game");
                }
                if error.is_transient() {
                    debug!(game, pid = process.pid, %error, "Error reading death count");
                } else {
                    warn!(game, pid = process.pid, %error, "Error reading death count");
                }
                PollOutcome::ReadFailed
            }
        };

        drop(process);
        outcome
    }

    fn read_deaths(&self, process: &ResolvedProcess<'_, P::Handle>) -> MemoryResult<i32> {
        let width = process.handle.detect_address_width()?;
        let address = PointerChainResolver::new(&self.platform).resolve(
            &process.handle,
            process.pid,
            process.target,
            width,
        )?;
        trace!(pid = process.pid, %width, address = %address, "Resolved death counter");
        read_i32(&process.handle, address)
    }
}

impl<P: ProcessPlatform + 'static> MonitorService<P> {
    /// Spawns the polling loop on the tokio runtime.
    ///
    /// Each iteration runs on the blocking pool so OS calls never stall
    /// async workers. The loop runs until the runtime shuts down.
    pub fn start_monitoring(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            targets = self.catalog.len(),
            poll_ms = self.intervals.poll.as_millis() as u64,
            retry_ms = self.intervals.retry.as_millis() as u64,
            "Starting game monitor"
        );

        tokio::spawn(async move {
            loop {
                let service = Arc::clone(&self);
                let outcome = match tokio::task::spawn_blocking(move || service.poll_once()).await
                {
                    Ok(outcome) => outcome,
                    Err(join_error) => {
                        error!(error = %join_error, "Polling iteration aborted");
                        PollOutcome::ReadFailed
                    }
                };
                tokio::time::sleep(self.delay_for(outcome)).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TargetDescriptor;
    use crate::core::types::{Address, AddressWidth};
    use crate::memory::simulated::{SimulatedPlatform, SimulatedProcess};
    use crate::monitor::state::NO_GAME_DETECTED;
    use pretty_assertions::assert_eq;

    fn game_a() -> SimulatedProcess {
        SimulatedProcess::new(4242, "GameA.exe", AddressWidth::SixtyFourBit)
            .with_module("GameA.exe", Address::new(0x400000))
            .with_pointer(Address::new(0x400100), Address::new(0x500000))
            .with_i32(Address::new(0x500020), 42)
    }

    fn service() -> MonitorService<SimulatedPlatform> {
        let catalog = Catalog::new(vec![TargetDescriptor::new(
            "GameA",
            "GameA",
            None,
            Some(vec![0x100, 0x20]),
        )])
        .unwrap();
        MonitorService::new(SimulatedPlatform::new(), catalog, PollIntervals::default())
    }

    #[test]
    fn test_tracks_running_game() {
        let service = service();
        service.platform().spawn(game_a());

        assert_eq!(service.poll_once(), PollOutcome::Tracking { deaths: 42 });
        assert_eq!(service.current_state(), (42, "GameA".to_string()));
        assert_eq!(service.platform().open_handle_count(), 0);
    }

    #[test]
    fn test_searching_without_game() {
        let service = service();
        assert_eq!(service.poll_once(), PollOutcome::Searching);
        assert_eq!(service.current_state(), (0, NO_GAME_DETECTED.to_string()));
    }

    #[test]
    fn test_delays_per_outcome() {
        let service = service();
        assert_eq!(
            service.delay_for(PollOutcome::Tracking { deaths: 1 }),
            Duration::from_millis(500)
        );
        assert_eq!(
            service.delay_for(PollOutcome::Searching),
            Duration::from_secs(2)
        );
        assert_eq!(
            service.delay_for(PollOutcome::ReadFailed),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_read_failure_keeps_previous_count() {
        let service = service();
        let process = service.platform().spawn(game_a());
        service.poll_once();

        // Chain becomes invalid, e.g. while the game is loading
        process.write_pointer(Address::new(0x400100), Address::null());
        assert_eq!(service.poll_once(), PollOutcome::ReadFailed);
        assert_eq!(service.current_state(), (42, "GameA".to_string()));
        assert_eq!(service.platform().open_handle_count(), 0);
    }

    #[test]
    fn test_label_updates_even_when_read_fails() {
        let service = service();
        let process = service.platform().spawn(game_a());
        process.set_fail_width_detection(true);

        assert_eq!(service.poll_once(), PollOutcome::ReadFailed);
        assert_eq!(service.current_state(), (0, "GameA".to_string()));
    }

    #[test]
    fn test_intervals_from_config() {
        let config = MonitorConfig {
            poll_interval_ms: 250,
            retry_interval_ms: 1500,
        };
        let intervals = PollIntervals::from(&config);
        assert_eq!(intervals.poll, Duration::from_millis(250));
        assert_eq!(intervals.retry, Duration::from_millis(1500));
    }
}
