//! Error types for program loading, pipeline runs, and the simulator driver.
//!
//! This module defines the failure modes the crate reports. It provides:
//! 1. **Pipeline Errors:** Misuse of a pipeline run (executing a finished run twice).
//! 2. **Load Errors:** I/O, JSON parse, and record validation failures at the input boundary.
//! 3. **Simulator Errors:** Failures while driving several pipeline policies, including worker panics.
//! 4. **Operand Errors:** Instruction records whose operands do not fit their opcode.
//!
//! The scheduling core itself is total over a validated program; every error here
//! comes either from the input boundary or from calling the API out of order.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::pipeline::engine::PipelineKind;
use crate::isa::opcodes::Opcode;

/// An operand slot does not match what the opcode's shape requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperandError {
    /// The opcode needs this register slot but it was absent.
    #[error("{opcode} requires an {slot} operand")]
    Missing {
        /// Opcode being constructed.
        opcode: Opcode,
        /// Slot name (`rs`, `rt` or `rd`).
        slot: &'static str,
    },

    /// The slot was supplied but the opcode does not use it.
    #[error("{opcode} does not take an {slot} operand")]
    Unexpected {
        /// Opcode being constructed.
        opcode: Opcode,
        /// Slot name (`rs`, `rt` or `rd`).
        slot: &'static str,
    },
}

/// Errors raised by a single [`Pipeline`](crate::core::pipeline::engine::Pipeline) run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// `execute` was called on a run that already completed.
    ///
    /// Re-running would double-count stalls against stale completion times;
    /// call `initialize` to start a fresh run.
    #[error("{kind} pipeline already executed; re-initialize before executing again")]
    AlreadyExecuted {
        /// Policy of the run that rejected the call.
        kind: PipelineKind,
    },
}

/// Errors raised while loading a program or configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("could not parse '{path}': {source}")]
    Parse {
        /// Path whose contents failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but does not describe a well-formed instruction.
    #[error("instruction {index} is malformed: {reason}")]
    InvalidInstruction {
        /// Program-order position of the offending record.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors raised by the [`Simulator`](crate::sim::simulator::Simulator) driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A pipeline run was misused.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A worker thread running one policy panicked before producing a report.
    #[error("worker running the {kind} pipeline panicked")]
    WorkerPanicked {
        /// Policy the worker was simulating.
        kind: PipelineKind,
    },
}
