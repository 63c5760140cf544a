//! Common types shared by every part of the simulator.
//!
//! This module provides the small building blocks the rest of the crate is written in terms of:
//! 1. **Registers:** A checked register identifier and the register-file size.
//! 2. **Error Handling:** Error enums for loading, pipeline runs, and the simulator driver.

/// Error types for loading, pipeline runs, and simulation.
pub mod error;

/// Register identifiers.
pub mod reg;

pub use error::{LoadError, OperandError, PipelineError, SimError};
pub use reg::{NUM_REGISTERS, Register};
