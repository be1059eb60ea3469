//! Progress tracking utilities for CLI operations

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Manages the spawn spinner and the run progress bar
pub struct ProgressManager {
    spawn_spinner: Option<ProgressBar>,
    run_progress: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            spawn_spinner: None,
            run_progress: None,
        }
    }

    /// Start the fleet spawn phase
    pub fn start_spawn(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap(),
        );
        spinner.set_message("Spawning vehicles...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spawn_spinner = Some(spinner);
    }

    /// Finish the fleet spawn phase
    pub fn finish_spawn(&mut self) {
        if let Some(spinner) = self.spawn_spinner.take() {
            spinner.finish_with_message("Vehicles spawned");
        }
    }

    /// Start the simulation run
    pub fn start_run(&mut self, total_steps: usize) {
        let progress = ProgressBar::new(total_steps as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} steps {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        progress.set_message("Simulating...");
        self.run_progress = Some(progress);
    }

    /// Advance the run by one step
    pub fn step(&mut self) {
        if let Some(progress) = &self.run_progress {
            progress.inc(1);
        }
    }

    /// Finish the simulation run
    pub fn finish_run(&mut self) {
        if let Some(progress) = self.run_progress.take() {
            progress.finish_with_message("done");
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_progress_tracks_steps() {
        let mut manager = ProgressManager::new();
        manager.start_run(10);

        manager.step();
        manager.step();
        assert_eq!(manager.run_progress.as_ref().unwrap().position(), 2);

        manager.finish_run();
        assert!(manager.run_progress.is_none());
    }

    #[test]
    fn spawn_spinner_clears_on_finish() {
        let mut manager = ProgressManager::new();
        manager.start_spawn();
        assert!(manager.spawn_spinner.is_some());
        manager.finish_spawn();
        assert!(manager.spawn_spinner.is_none());
    }
}
