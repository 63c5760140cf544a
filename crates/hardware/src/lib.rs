//! Five-stage pipeline scheduling simulator library.
//!
//! This crate computes per-instruction completion times of a classic
//! Fetch/Decode/Execute/Memory/Writeback pipeline with the following:
//! 1. **ISA:** Opcode metadata and the immutable instruction record.
//! 2. **Core:** Register dependence tracking, stage occupancy, and the ideal, stall, and forwarding hazard policies.
//! 3. **Simulation:** JSON loader, configuration, multi-policy driver, and statistics.

/// Common types (registers, errors).
pub mod common;
/// Simulator configuration (defaults and policy selection).
pub mod config;
/// Pipeline model (dependences, stages, hazards, engine, reports).
pub mod core;
/// Instruction set (opcodes, instruction record).
pub mod isa;
/// Program loader and multi-policy simulator.
pub mod sim;
/// Per-run pipeline statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// One run of one hazard policy.
pub use crate::core::pipeline::{Pipeline, PipelineKind, PipelineReport, Program};
/// Decoded instruction record.
pub use crate::isa::Instruction;
/// Runs several policies over one program.
pub use crate::sim::Simulator;
