//! Per-run pipeline statistics.
//!
//! This module tracks what one pipeline run spent its cycles on. It provides:
//! 1. **Cycle and CPI:** Total cycles simulated, retired instructions, and derived CPI.
//! 2. **Stalls:** Cycles in which a data hazard or an unresolved control transfer held the pipeline.

use std::fmt;

use serde::Serialize;

/// Statistics of one pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Total cycles simulated.
    pub cycles: u64,
    /// Number of instructions that left Writeback.
    pub instructions_retired: u64,
    /// Cycles in which a RAW hazard denied an admission.
    pub stalls_data: u64,
    /// Cycles in which Fetch waited on a branch or jump target.
    pub stalls_control: u64,
}

impl PipelineStats {
    /// Accounts for one simulated cycle.
    pub fn record_cycle(&mut self, data_stall: bool, control_stall: bool) {
        self.cycles += 1;
        if data_stall {
            self.stalls_data += 1;
        }
        if control_stall {
            self.stalls_control += 1;
        }
    }

    /// Cycles per retired instruction, or 0.0 before anything retired.
    #[allow(clippy::cast_precision_loss)]
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "stalls.data              {}", self.stalls_data)?;
        write!(f, "stalls.control           {}", self.stalls_control)
    }
}
