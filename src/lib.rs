//! idmsim traffic-flow simulator.
//!
//! This crate ties together the simulation engine and the command-line
//! interface for the Intelligent Driver Model traffic simulator.

pub use idmsim_core as core;

/// Version of the idmsim system
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
