//! Simulation driver and program loading.
//!
//! Provides the JSON loaders that validate input programs and the simulator
//! that runs the configured pipeline policies over them.

/// Program and configuration loading.
pub mod loader;

/// Multi-policy simulator.
pub mod simulator;

pub use loader::{load_config, load_program};
pub use simulator::Simulator;
