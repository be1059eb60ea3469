//! The `visualize` command: run the engine, save the trace, then play it
//! back in the terminal.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use idmsim_core::config::FileConfig;
use idmsim_core::error::SimResult;
use idmsim_core::simulation::TrafficSimulation;
use idmsim_core::trace::{self, DEFAULT_TRACE_PATH};

use crate::progress::ProgressManager;
use crate::render;
use crate::{SimFlags, VisualFlags};

/// Execute the visualize command
pub async fn execute(flags: SimFlags, visual: VisualFlags, config_path: &Path) -> SimResult<()> {
    let file = FileConfig::load_or_default(config_path)?;
    let config = flags.into_partial().merged_with(&file.simulation).into_config()?;
    let visual = visual.apply(file.visual);
    visual.validate()?;
    debug!(?config, ?visual, "resolved visualization settings");

    let mut progress = ProgressManager::new();
    progress.start_spawn();
    let mut sim = TrafficSimulation::new(config, file.idm)?;
    progress.finish_spawn();

    progress.start_run(sim.steps());
    sim.run_with(|_, _| progress.step());
    progress.finish_run();

    // The GUI front end always kept a CSV of what it played back; do the same.
    trace::write_csv(sim.rows(), PathBuf::from(DEFAULT_TRACE_PATH))?;
    info!(path = DEFAULT_TRACE_PATH, "trace written");

    let config = sim.config().clone();
    render::play(&sim.into_rows(), &config, &visual).await
}
