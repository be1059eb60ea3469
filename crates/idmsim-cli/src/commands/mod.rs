//! CLI command implementations

pub mod setup;
pub mod simulate;
pub mod visualize;

// Export command functions with clear names
pub use setup::execute as execute_setup;
pub use simulate::execute as execute_simulate;
pub use visualize::execute as execute_visualize;
