//! The `simulate` command: run the engine and write the trace CSV.

use std::path::{Path, PathBuf};
use std::time::Instant;

use console::style;
use tracing::{debug, info};

use idmsim_core::config::FileConfig;
use idmsim_core::error::SimResult;
use idmsim_core::simulation::TrafficSimulation;
use idmsim_core::trace::{self, DEFAULT_TRACE_PATH};

use crate::progress::ProgressManager;
use crate::SimFlags;

/// Execute the simulate command
pub async fn execute(flags: SimFlags, output: Option<PathBuf>, config_path: &Path) -> SimResult<()> {
    let file = FileConfig::load_or_default(config_path)?;
    let config = flags.into_partial().merged_with(&file.simulation).into_config()?;
    debug!(?config, "resolved simulation settings");

    let mut progress = ProgressManager::new();
    progress.start_spawn();
    let mut sim = TrafficSimulation::new(config, file.idm)?;
    progress.finish_spawn();

    let started = Instant::now();
    progress.start_run(sim.steps());
    sim.run_with(|_, _| progress.step());
    progress.finish_run();
    let elapsed = started.elapsed();

    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_TRACE_PATH));
    trace::write_csv(sim.rows(), &path)?;
    info!(path = %path.display(), rows = sim.rows().len(), "trace written");

    let config = sim.config();
    println!(
        "{} {} vehicles, {} steps of {} s over {} m ({} spawn), {:.2} s wall time",
        style("Simulation finished:").green().bold(),
        config.num_vehicles,
        sim.steps(),
        config.dt,
        config.road_length,
        config.distribution,
        elapsed.as_secs_f64(),
    );
    println!(
        "Trace saved to {} at {}",
        style(path.display()).cyan(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    );

    Ok(())
}
