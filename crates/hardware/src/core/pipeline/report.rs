//! Diagnostic report of a pipeline run.

use std::fmt;

use serde::Serialize;

use crate::common::reg::Register;
use crate::core::pipeline::engine::PipelineKind;
use crate::stats::PipelineStats;

/// Completion time of one instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstructionTiming {
    /// Program-order index.
    pub index: usize,
    /// Cycle at which it left Writeback; `None` if the run has not finished it.
    pub completion_time: Option<u64>,
    /// Textual form of the instruction.
    pub text: String,
}

/// A RAW dependence as reported to the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RawDependence {
    /// Index of the writing instruction.
    pub producer: usize,
    /// Index of the reading instruction.
    pub consumer: usize,
    /// Register carrying the value.
    pub register: Register,
}

/// Everything a driver needs to present one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Policy of the run.
    pub kind: PipelineKind,
    /// Per-instruction completion times in program order.
    pub timings: Vec<InstructionTiming>,
    /// RAW dependences in detection order.
    pub raw_dependences: Vec<RawDependence>,
    /// Completion time of the last instruction (0 for an empty program).
    pub total_time: u64,
    /// Cycle and stall counters.
    pub stats: PipelineStats,
}

impl PipelineReport {
    fn text_of(&self, index: usize) -> &str {
        self.timings.get(index).map_or("", |t| t.text.as_str())
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: ", self.kind)?;
        for dep in &self.raw_dependences {
            writeln!(
                f,
                "RAW Dependence between instruction {} {} and {} {}",
                dep.producer,
                self.text_of(dep.producer),
                dep.consumer,
                self.text_of(dep.consumer)
            )?;
        }
        writeln!(f, "Instr# \t CompletionTime \t Mnemonic ")?;
        for timing in &self.timings {
            match timing.completion_time {
                Some(t) => writeln!(f, "{}\t{}\t\t\t|{}", timing.index, t, timing.text)?,
                None => writeln!(f, "{}\t-\t\t\t|{}", timing.index, timing.text)?,
            }
        }
        write!(f, "Total time is {}", self.total_time)
    }
}
