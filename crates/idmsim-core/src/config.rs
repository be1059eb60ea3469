//! Configuration for simulation runs.
//!
//! Settings come from two places: an optional `idmsim.toml` file with
//! `[simulation]`, `[idm]` and `[visual]` tables, and command-line flags.
//! Flags win over file values; a required simulation key present in
//! neither place is reported as a configuration error naming every
//! missing key.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{SimError, SimResult};
use crate::spawn::SpawnDistribution;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "idmsim.toml";

/// Fully resolved simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of vehicles on the road
    pub num_vehicles: usize,
    /// Total simulated time in seconds
    pub sim_time: f64,
    /// Integration time step in seconds
    pub dt: f64,
    /// Road length in metres
    pub road_length: f64,
    /// Initial position distribution
    pub distribution: SpawnDistribution,
    /// Minimum initial speed in m/s
    pub speed_min: f64,
    /// Maximum initial speed in m/s
    pub speed_max: f64,
    /// Fixed speed for the front-most vehicle; it then ignores the IDM
    #[serde(default)]
    pub first_speed: Option<f64>,
    /// RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Number of integration steps the run will take.
    pub fn steps(&self) -> usize {
        (self.sim_time / self.dt) as usize
    }

    /// Validate the configuration
    pub fn validate(&self) -> SimResult<()> {
        if self.num_vehicles == 0 {
            return Err(SimError::config("num_vehicles must be at least 1"));
        }
        if !(self.dt > 0.0) {
            return Err(SimError::config(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.sim_time < self.dt {
            return Err(SimError::config(format!(
                "sim_time ({}) must be at least one time step ({})",
                self.sim_time, self.dt
            )));
        }
        if !(self.road_length > 0.0) {
            return Err(SimError::config(format!(
                "road_length must be positive, got {}",
                self.road_length
            )));
        }
        if self.speed_min < 0.0 || self.speed_max < 0.0 {
            return Err(SimError::config("initial speeds must be non-negative"));
        }
        if self.speed_min > self.speed_max {
            return Err(SimError::config(format!(
                "speed_min ({}) exceeds speed_max ({})",
                self.speed_min, self.speed_max
            )));
        }
        if let Some(v) = self.first_speed {
            if v < 0.0 {
                return Err(SimError::config("first_speed must be non-negative"));
            }
        }
        Ok(())
    }
}

/// Intelligent Driver Model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdmParams {
    /// Maximum acceleration in m/s^2
    pub a_max: f64,
    /// Comfortable deceleration in m/s^2
    pub b: f64,
    /// Free-flow exponent
    pub delta: f64,
    /// Jam distance in metres
    pub s0: f64,
    /// Desired time headway in seconds
    pub t_headway: f64,
    /// Desired free-flow speed in m/s
    pub v0: f64,
}

impl Default for IdmParams {
    fn default() -> Self {
        Self {
            a_max: 1.0,
            b: 1.5,
            delta: 4.0,
            s0: 2.0,
            t_headway: 1.5,
            v0: 30.0,
        }
    }
}

impl IdmParams {
    /// Validate the parameters
    pub fn validate(&self) -> SimResult<()> {
        if !(self.a_max > 0.0) || !(self.b > 0.0) {
            return Err(SimError::config("a_max and b must be positive"));
        }
        if !(self.v0 > 0.0) {
            return Err(SimError::config("v0 must be positive"));
        }
        if self.s0 < 0.0 || self.t_headway < 0.0 {
            return Err(SimError::config("s0 and t_headway must be non-negative"));
        }
        Ok(())
    }
}

/// Terminal playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Road strip color
    pub road_color: Rgb,
    /// Vehicle glyph color
    pub car_color: Rgb,
    /// Label text color
    pub label_color: Rgb,
    /// Vehicle length in metres, scales the glyph width
    pub car_length: f64,
    /// Vehicle width in metres
    pub car_width: f64,
    /// Lane width in metres, scales the road strip height
    pub lane_width: f64,
    /// Render every n-th simulation step
    pub frame_skip: usize,
    /// Playback speed multiplier; 2.0 plays twice as fast as real time
    pub playback_speed: f64,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            road_color: Rgb { r: 0.4, g: 0.4, b: 0.4 },
            car_color: Rgb { r: 0.9, g: 0.3, b: 0.2 },
            label_color: Rgb { r: 1.0, g: 1.0, b: 1.0 },
            car_length: 5.0,
            car_width: 2.0,
            lane_width: 4.0,
            frame_skip: 2,
            playback_speed: 1.0,
        }
    }
}

impl VisualConfig {
    /// Validate the settings
    pub fn validate(&self) -> SimResult<()> {
        if self.frame_skip == 0 {
            return Err(SimError::config("frame_skip must be at least 1"));
        }
        if !(self.playback_speed > 0.0) {
            return Err(SimError::config("playback_speed must be positive"));
        }
        if !(self.car_length > 0.0) || !(self.car_width > 0.0) || !(self.lane_width > 0.0) {
            return Err(SimError::config(
                "car_length, car_width and lane_width must be positive",
            ));
        }
        Ok(())
    }
}

/// Simulation settings with every field optional, used both for the
/// `[simulation]` file table and for command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSimulation {
    pub num_vehicles: Option<usize>,
    pub sim_time: Option<f64>,
    pub dt: Option<f64>,
    pub road_length: Option<f64>,
    pub distribution: Option<SpawnDistribution>,
    pub speed_min: Option<f64>,
    pub speed_max: Option<f64>,
    pub first_speed: Option<f64>,
    pub seed: Option<u64>,
}

impl PartialSimulation {
    /// Overlay `self` on top of `fallback`; values in `self` win.
    pub fn merged_with(&self, fallback: &PartialSimulation) -> PartialSimulation {
        PartialSimulation {
            num_vehicles: self.num_vehicles.or(fallback.num_vehicles),
            sim_time: self.sim_time.or(fallback.sim_time),
            dt: self.dt.or(fallback.dt),
            road_length: self.road_length.or(fallback.road_length),
            distribution: self.distribution.or(fallback.distribution),
            speed_min: self.speed_min.or(fallback.speed_min),
            speed_max: self.speed_max.or(fallback.speed_max),
            first_speed: self.first_speed.or(fallback.first_speed),
            seed: self.seed.or(fallback.seed),
        }
    }

    /// Require every mandatory key, reporting all missing ones at once.
    pub fn into_config(self) -> SimResult<SimulationConfig> {
        let missing: Vec<&str> = [
            ("num_vehicles", self.num_vehicles.is_none()),
            ("sim_time", self.sim_time.is_none()),
            ("dt", self.dt.is_none()),
            ("road_length", self.road_length.is_none()),
            ("distribution", self.distribution.is_none()),
            ("speed_min", self.speed_min.is_none()),
            ("speed_max", self.speed_max.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(SimError::missing_parameters(&missing));
        }

        let config = SimulationConfig {
            num_vehicles: self.num_vehicles.unwrap_or_default(),
            sim_time: self.sim_time.unwrap_or_default(),
            dt: self.dt.unwrap_or_default(),
            road_length: self.road_length.unwrap_or_default(),
            distribution: self.distribution.unwrap_or(SpawnDistribution::Uniform),
            speed_min: self.speed_min.unwrap_or_default(),
            speed_max: self.speed_max.unwrap_or_default(),
            first_speed: self.first_speed,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Contents of `idmsim.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub simulation: PartialSimulation,
    pub idm: IdmParams,
    pub visual: VisualConfig,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&contents)?;
        config.idm.validate()?;
        config.visual.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults so
    /// fully flag-driven runs work without a config file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_partial() -> PartialSimulation {
        PartialSimulation {
            num_vehicles: Some(5),
            sim_time: Some(30.0),
            dt: Some(0.1),
            road_length: Some(500.0),
            distribution: Some(SpawnDistribution::Uniform),
            speed_min: Some(10.0),
            speed_max: Some(20.0),
            first_speed: None,
            seed: Some(7),
        }
    }

    #[test]
    fn resolves_complete_settings() {
        let config = full_partial().into_config().unwrap();
        assert_eq!(config.num_vehicles, 5);
        assert_eq!(config.steps(), 300);
    }

    #[test]
    fn reports_every_missing_key() {
        let partial = PartialSimulation {
            dt: Some(0.1),
            ..Default::default()
        };
        let err = partial.into_config().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("num_vehicles"));
        assert!(msg.contains("sim_time"));
        assert!(msg.contains("speed_max"));
        assert!(!msg.contains("dt,"));
    }

    #[test]
    fn flags_override_file_values() {
        let mut flags = PartialSimulation::default();
        flags.num_vehicles = Some(12);
        let merged = flags.merged_with(&full_partial());
        assert_eq!(merged.num_vehicles, Some(12));
        assert_eq!(merged.sim_time, Some(30.0));
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let mut partial = full_partial();
        partial.speed_min = Some(30.0);
        partial.speed_max = Some(10.0);
        assert!(partial.into_config().is_err());
    }

    #[test]
    fn rejects_zero_dt() {
        let mut partial = full_partial();
        partial.dt = Some(0.0);
        assert!(partial.into_config().is_err());
    }

    #[test]
    fn parses_file_tables() {
        let toml_src = r#"
            [simulation]
            num_vehicles = 8
            sim_time = 60.0
            dt = 0.05
            road_length = 800.0
            distribution = "normal"
            speed_min = 5.0
            speed_max = 15.0
            seed = 42

            [idm]
            a_max = 1.2
            v0 = 33.0

            [visual]
            road_color = "0.3,0.3,0.3"
            frame_skip = 4
        "#;
        let config: FileConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.simulation.num_vehicles, Some(8));
        assert_eq!(
            config.simulation.distribution,
            Some(SpawnDistribution::Normal)
        );
        assert_eq!(config.idm.a_max, 1.2);
        // Unset IDM keys keep their defaults
        assert_eq!(config.idm.b, 1.5);
        assert_eq!(config.visual.frame_skip, 4);
        assert_eq!(config.visual.road_color, Rgb { r: 0.3, g: 0.3, b: 0.3 });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = FileConfig::load_or_default("/nonexistent/idmsim.toml").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn idm_defaults_are_sane() {
        let params = IdmParams::default();
        params.validate().unwrap();
        assert_eq!(params.delta, 4.0);
    }
}
