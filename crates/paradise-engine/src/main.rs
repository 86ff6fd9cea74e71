//! Headless driver for the Stickman Paradise simulation.
//!
//! Loads the configuration, generates the town, and runs the frame loop
//! until a configured bound is reached, everyone is dead, or the process
//! receives Ctrl-C. Narrative event lines go to the log. While it runs,
//! the operator can type commands on stdin (see [`console`]).
//!
//! # Startup Sequence
//!
//! 1. Load configuration (first argument, or `paradise-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Generate the town and populate it
//! 4. Create run controls, install the Ctrl-C handler, open the console
//! 5. Run the frame loop
//! 6. Log the result

mod console;
mod error;
mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use paradise_core::config::SimulationConfig;
use paradise_core::controls::RunControls;
use paradise_core::event_log::TracingSink;
use paradise_core::runner;
use paradise_core::tick::Simulation;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report::MinuteReport;

const DEFAULT_CONFIG: &str = "paradise-config.yaml";

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let (config, loaded) = load_config(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.logging.level)?)
        .with_target(true)
        .init();

    info!("paradise-engine starting");
    if loaded {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        seed = ?config.world.seed,
        grid_rows = config.world.grid_rows,
        grid_cols = config.world.grid_cols,
        frame_rate = config.engine.frame_rate,
        max_frames = config.engine.max_frames,
        max_real_time_seconds = config.engine.max_real_time_seconds,
        "Settings"
    );

    let mut sim = Simulation::new(&config, Box::new(TracingSink))?;

    let controls = Arc::new(RunControls::new(&config.engine));
    {
        let controls = Arc::clone(&controls);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping after this frame");
                    controls.request_stop();
                }
                Err(e) => warn!(error = %e, "Could not listen for Ctrl-C"),
            }
        });
    }
    console::spawn(Arc::clone(&controls));

    let step = 1.0 / f64::from(config.engine.frame_rate);
    let mut report = MinuteReport::new();
    let result = runner::run_simulation(&mut sim, step, &controls, &mut report).await?;

    runner::log_simulation_end(&result, &sim);
    let population = sim.population();
    info!(
        end_reason = ?result.end_reason,
        total_frames = result.total_frames,
        deaths = report.deaths(),
        alive = population.alive,
        residents = population.residents,
        households = population.households,
        "paradise-engine shutdown complete"
    );

    Ok(())
}

/// Load the config at `path`, or defaults when the file does not exist.
///
/// The flag tells whether a file was read.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::parse("")?, false))
    }
}

/// `RUST_LOG` wins over the configured level.
fn log_filter(level: &str) -> Result<EnvFilter, EngineError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| EngineError::LogFilter {
        directive: level.to_owned(),
        message: e.to_string(),
    })
}
