//! Demo server binary for tickwork.
//!
//! Wires the action engine into a paced tick loop over an in-memory world
//! with a few scripted players, then logs what they achieved.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tickwork-config.yaml` (or `TICKWORK_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Assemble engine state: clock, scheduler, host
//! 4. Populate the demo world
//! 5. Run the tick loop until `max_ticks` or Ctrl-C
//! 6. Log the result

mod demo;
mod error;
mod runner;

use std::path::PathBuf;

use tickwork_core::config::{EngineConfig, LoggingConfig};
use tickwork_core::events::dispatch;
use tickwork_core::tick::EngineState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Environment variable naming an alternative config file.
const CONFIG_ENV: &str = "TICKWORK_CONFIG";

/// Default config file, relative to the working directory.
const CONFIG_FILE: &str = "tickwork-config.yaml";

/// Application entry point for the demo server.
///
/// # Errors
///
/// Returns an error if configuration, setup, or the tick loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so failures here are
    //    reported by the runtime's error return.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("tickwork-engine starting");
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.world.max_ticks,
        "Configuration loaded"
    );

    // 3. Assemble engine state.
    let mut state = EngineState::new(&config)?;
    info!(capacity = config.inventory.capacity, "Engine state assembled");

    // 4. Populate the demo world.
    let demo = demo::populate(&mut state)?;
    for event in demo.greetings() {
        dispatch(&mut state, event)?;
    }

    // 5. Run the tick loop.
    let report = runner::run(&mut state, &demo, config.world.max_ticks).await?;

    // 6. Log results.
    runner::log_run_end(&report);
    demo.log_summary(&state);

    info!(
        stop = ?report.stop,
        total_ticks = report.total_ticks,
        "tickwork-engine shutdown complete"
    );

    Ok(())
}

/// Load the engine configuration.
///
/// Reads the file named by `TICKWORK_CONFIG`, else `tickwork-config.yaml`
/// in the working directory. A missing file means defaults.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path =
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    if config_path.exists() {
        let config = EngineConfig::from_file(&config_path)?;
        Ok(config)
    } else {
        Ok(EngineConfig::default())
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
