//! The `setup` command: create the conda environment the simulator's
//! Python analysis tooling runs in, then print usage hints.
//!
//! The environment spec file's schema belongs to conda; it is handed over
//! untouched. Success and failure semantics are inherited from the
//! invoked command.

use std::path::Path;

use console::{style, Term};
use tokio::process::Command;
use tracing::{debug, warn};

use idmsim_core::error::{SimError, SimResult};

/// Display name of the environment, must match the spec file's `name:`.
pub const ENV_NAME: &str = "idm-traffic";

/// Execute the setup command
pub async fn execute(file: &Path, yes: bool) -> SimResult<()> {
    let term = Term::stdout();

    println!(
        "{}",
        style(format!("Setting up the '{ENV_NAME}' conda environment")).bold()
    );
    println!("Creating the environment from {}...", file.display());
    println!();

    debug!(file = %file.display(), "invoking conda env create");
    let status = Command::new("conda")
        .args(["env", "create", "-f"])
        .arg(file)
        .status()
        .await
        .map_err(|e| {
            warn!("failed to launch conda: {e}");
            SimError::bootstrap(format!(
                "could not run conda ({e}); check that conda is installed and on PATH"
            ))
        })?;

    if !status.success() {
        println!(
            "{}",
            style("Environment creation failed; check that conda is installed and on PATH.")
                .yellow()
        );
        return Err(SimError::CommandFailed(
            "conda env create".to_string(),
            status.to_string(),
        ));
    }

    println!();
    println!("{}", style("Environment created.").green().bold());
    println!("Next steps:");
    println!("  conda activate {ENV_NAME}");
    println!("  idmsim simulate     # run the model, writes data/simulation_output.csv");
    println!("  idmsim visualize    # replay the run in the terminal");

    if !yes && term.is_term() {
        println!();
        term.write_str("Press Enter to close...")?;
        term.read_line()?;
    }

    Ok(())
}
