//! Command-line interface for the idmsim traffic simulator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use once_cell::sync::OnceCell;

use idmsim_core::color::Rgb;
use idmsim_core::config::{PartialSimulation, VisualConfig, DEFAULT_CONFIG_PATH};
use idmsim_core::spawn::SpawnDistribution;

mod commands;
mod progress;
mod render;

pub use commands::*;
pub use progress::*;

static LOGGING: OnceCell<()> = OnceCell::new();

fn init_logging(verbose: bool) {
    let _ = LOGGING.get_or_init(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(
                    if verbose {
                        tracing::Level::DEBUG.into()
                    } else {
                        tracing::Level::WARN.into()
                    },
                ),
            )
            .with_target(false)
            .with_writer(std::io::stderr);

        let _ = builder.try_init();
    });
}

/// CLI arguments parser
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Simulation settings; anything left unset falls back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SimFlags {
    /// Number of vehicles
    #[arg(long)]
    num_vehicles: Option<usize>,

    /// Total simulated time in seconds
    #[arg(long)]
    sim_time: Option<f64>,

    /// Integration time step in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Road length in metres
    #[arg(long)]
    road_length: Option<f64>,

    /// Spawn distribution: uniform, random, normal, exponential, triangular
    #[arg(long)]
    distribution: Option<SpawnDistribution>,

    /// Minimum initial speed in m/s
    #[arg(long)]
    speed_min: Option<f64>,

    /// Maximum initial speed in m/s
    #[arg(long)]
    speed_max: Option<f64>,

    /// Fixed speed for the front-most vehicle in m/s
    #[arg(long)]
    first_speed: Option<f64>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl SimFlags {
    fn into_partial(self) -> PartialSimulation {
        PartialSimulation {
            num_vehicles: self.num_vehicles,
            sim_time: self.sim_time,
            dt: self.dt,
            road_length: self.road_length,
            distribution: self.distribution,
            speed_min: self.speed_min,
            speed_max: self.speed_max,
            first_speed: self.first_speed,
            seed: self.seed,
        }
    }
}

/// Playback settings; anything left unset falls back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct VisualFlags {
    /// Road color as "r,g,b" with components in 0.0-1.0
    #[arg(long)]
    road_color: Option<Rgb>,

    /// Vehicle color as "r,g,b" with components in 0.0-1.0
    #[arg(long)]
    car_color: Option<Rgb>,

    /// Label color as "r,g,b" with components in 0.0-1.0
    #[arg(long)]
    label_color: Option<Rgb>,

    /// Vehicle length in metres
    #[arg(long)]
    car_length: Option<f64>,

    /// Vehicle width in metres
    #[arg(long)]
    car_width: Option<f64>,

    /// Lane width in metres
    #[arg(long)]
    lane_width: Option<f64>,

    /// Render every n-th simulation step
    #[arg(long)]
    frame_skip: Option<usize>,

    /// Playback speed multiplier
    #[arg(long)]
    playback_speed: Option<f64>,
}

impl VisualFlags {
    fn apply(self, mut base: VisualConfig) -> VisualConfig {
        if let Some(v) = self.road_color {
            base.road_color = v;
        }
        if let Some(v) = self.car_color {
            base.car_color = v;
        }
        if let Some(v) = self.label_color {
            base.label_color = v;
        }
        if let Some(v) = self.car_length {
            base.car_length = v;
        }
        if let Some(v) = self.car_width {
            base.car_width = v;
        }
        if let Some(v) = self.lane_width {
            base.lane_width = v;
        }
        if let Some(v) = self.frame_skip {
            base.frame_skip = v;
        }
        if let Some(v) = self.playback_speed {
            base.playback_speed = v;
        }
        base
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the simulation and write the trace CSV
    Simulate {
        #[command(flatten)]
        sim: SimFlags,

        /// Trace CSV path (default: data/simulation_output.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the simulation and play it back in the terminal
    Visualize {
        #[command(flatten)]
        sim: SimFlags,

        #[command(flatten)]
        visual: VisualFlags,
    },

    /// Create the conda environment and print usage hints
    Setup {
        /// Environment spec file for the package manager
        #[arg(short, long, default_value = "environment.yml")]
        file: PathBuf,

        /// Skip the final acknowledgment prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Run the CLI application
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate { sim, output } => {
            commands::execute_simulate(sim, output, &cli.config).await?;
        }
        Commands::Visualize { sim, visual } => {
            commands::execute_visualize(sim, visual, &cli.config).await?;
        }
        Commands::Setup { file, yes } => {
            commands::execute_setup(&file, yes).await?;
        }
    }

    Ok(())
}
