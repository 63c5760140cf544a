//! Five-stage pipeline scheduling.
//!
//! This module contains the cycle-by-cycle model of the pipeline.
//! It includes the following components:
//! 1. **Dependence:** Per-register access tracking and the RAW/WAR/WAW hazard log.
//! 2. **Program:** The shared instruction arena with its precomputed dependences.
//! 3. **Latches:** Stage identities and the stage occupancy array.
//! 4. **Hazards:** Admission rules of the ideal, stall, and forwarding policies.
//! 5. **Engine:** The stage-advancement driver and policy selection.
//! 6. **Report:** Completion times and dependences presented to the driver.

/// Register dependence tracker.
pub mod dependence;

/// Stage-advancement engine and policy selection.
pub mod engine;

/// Stage admission rules.
pub mod hazards;

/// Pipeline stages and occupancy array.
pub mod latches;

/// Shared instruction arena.
pub mod program;

/// Run reports.
pub mod report;

pub use dependence::{Dependence, DependenceKind, DependenceTracker, RegisterAccess};
pub use engine::{Pipeline, PipelineKind};
pub use latches::{Stage, StageSlots};
pub use program::Program;
pub use report::{InstructionTiming, PipelineReport, RawDependence};
