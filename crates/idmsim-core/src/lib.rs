//! Core types and simulation engine for the idmsim traffic simulator.
//!
//! This crate provides the Intelligent Driver Model (IDM) car-following
//! engine, the spawn distributions, the configuration layer and the trace
//! export used by the rest of the idmsim ecosystem.

pub mod color;
pub mod config;
pub mod error;
pub mod idm;
pub mod simulation;
pub mod spawn;
pub mod trace;
pub mod vehicle;

// Re-export commonly used types
pub use crate::color::Rgb;
pub use crate::config::{FileConfig, IdmParams, PartialSimulation, SimulationConfig, VisualConfig};
pub use crate::error::{SimError, SimResult};
pub use crate::idm::IdmModel;
pub use crate::simulation::TrafficSimulation;
pub use crate::spawn::SpawnDistribution;
pub use crate::trace::{TraceRow, DEFAULT_TRACE_PATH};
pub use crate::vehicle::{Vehicle, VEHICLE_LENGTH, VEHICLE_MASS};
