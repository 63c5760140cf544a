//! Processor core model.
//!
//! Only the instruction pipeline is modeled: stage occupancy, hazard policies and
//! register dependences. Register values and memory contents are not simulated.

/// Pipeline scheduling (dependences, stages, hazards, engine, reports).
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineKind};
