use anyhow::{Context, Result};
use clap::Parser;
use death_counter::catalog::Catalog;
use death_counter::config::{validate_config, Config, ConfigLoader, DEFAULT_CONFIG_FILE};
use death_counter::core::types::{Address, AddressWidth};
use death_counter::memory::access::ProcessPlatform;
use death_counter::memory::simulated::{SimulatedPlatform, SimulatedProcess};
use death_counter::monitor::{MonitorService, MonitorSnapshot, PollIntervals};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_PID: u32 = 4711;
const DEMO_MODULE_BASE: u64 = 0x1_4000_0000;
const DEMO_PLAYER_DATA: u64 = 0x7FF6_1000_0000;

#[derive(Parser)]
#[command(name = "death-counter")]
#[command(about = "Death counter for Souls-like games", version)]
struct Args {
    /// Configuration file
    #[arg(env = "DEATH_COUNTER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Monitor a simulated game instead of live processes
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args { config, demo } = Args::parse();

    let loader = ConfigLoader::new(&config);
    let config = loader
        .load_or_default()
        .with_context(|| format!("loading {}", loader.path().display()))?;
    validate_config(&config)?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.logging.show_target)
        .init();

    info!("Starting death counter v{}", env!("CARGO_PKG_VERSION"));
    info!("Architecture: {}", std::env::consts::ARCH);

    #[cfg(windows)]
    {
        if !demo {
            return run(death_counter::windows::WindowsPlatform::new(), &config).await;
        }
    }
    #[cfg(not(windows))]
    {
        if !demo {
            info!("No native process access on this platform, running the demo game");
        }
    }

    let platform = SimulatedPlatform::new();
    let game = platform.spawn(demo_game());
    tokio::spawn(async move {
        let mut deaths = 0;
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            deaths += 1;
            game.write_i32(Address::new(DEMO_PLAYER_DATA + 0x98), deaths);
        }
    });
    run(platform, &config).await
}

async fn run<P: ProcessPlatform + 'static>(platform: P, config: &Config) -> Result<()> {
    let service = Arc::new(MonitorService::new(
        platform,
        Catalog::builtin(),
        PollIntervals::from(&config.monitor),
    ));
    let state = service.state();
    let monitor = Arc::clone(&service).start_monitoring();

    info!("Death counter ready. Press Ctrl+C to shutdown.");
    let mut last = MonitorSnapshot::default();
    let mut ticker = tokio::time::interval(PollIntervals::from(&config.monitor).poll);
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            _ = ticker.tick() => {
                let snapshot = state.snapshot();
                if snapshot != last {
                    info!(game = %snapshot.game, deaths = snapshot.deaths, "Counter");
                    last = snapshot;
                }
            }
        }
    }

    monitor.abort();
    info!("Shutting down death counter");
    Ok(())
}

/// A 64-bit Dark Souls III process with a populated counter chain
fn demo_game() -> SimulatedProcess {
    let base = Address::new(DEMO_MODULE_BASE);
    SimulatedProcess::new(DEMO_PID, "DarkSoulsIII.exe", AddressWidth::SixtyFourBit)
        .with_module("DarkSoulsIII.exe", base)
        .with_pointer(base.offset(0x47572B8), Address::new(DEMO_PLAYER_DATA))
        .with_i32(Address::new(DEMO_PLAYER_DATA + 0x98), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_config_path_and_demo_flag() {
        let args = Args::try_parse_from(["death-counter", "--demo", "custom.toml"]).unwrap();
        assert!(args.demo);
        assert_eq!(args.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(Args::try_parse_from(["death-counter", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["death-counter", "a.toml", "b.toml"]).is_err());
    }
}
