
/// Multi-policy simulator.
pub mod simulator;
