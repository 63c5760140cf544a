//! Pipeline policy selection and the stage-advancement engine.
//!
//! This module drives a program through the five stages one cycle at a time:
//! 1. **`PipelineKind`:** Closed enum of hazard policies, dispatched to pure admission rules.
//! 2. **`Pipeline`:** One run of one policy with its occupancy, fetch counter and completion times.
//!
//! Every cycle first drains Writeback, stamping the drained instruction's
//! completion time, then visits the stages from Writeback down to Fetch and
//! moves each upstream instruction forward when its target stage admits it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::error::PipelineError;
use crate::core::pipeline::hazards::{self, Admission, HazardView};
use crate::core::pipeline::latches::{Stage, StageSlots};
use crate::core::pipeline::program::Program;
use crate::core::pipeline::report::{InstructionTiming, PipelineReport, RawDependence};
use crate::isa::instruction::Instruction;
use crate::stats::PipelineStats;

/// Hazard policy of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PipelineKind {
    /// No hazard handling at all.
    #[default]
    #[serde(alias = "IDEAL", alias = "ideal")]
    Ideal,
    /// Stall on data hazards until the producer retires; no forwarding.
    #[serde(alias = "STALL", alias = "stall")]
    Stall,
    /// Resolve data hazards by forwarding; loads cost one bubble.
    #[serde(alias = "FORWARDING", alias = "forwarding")]
    Forwarding,
}

impl PipelineKind {
    /// Every policy, in reporting order.
    pub const ALL: [Self; 3] = [Self::Ideal, Self::Stall, Self::Forwarding];

    /// Upper-case name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ideal => "IDEAL",
            Self::Stall => "STALL",
            Self::Forwarding => "FORWARDING",
        }
    }

    /// Asks whether `stage` may accept the instruction behind it.
    pub fn admission(self, view: &HazardView<'_>, stage: Stage) -> Admission {
        match self {
            Self::Ideal => hazards::ideal(view, stage),
            Self::Stall => hazards::stall(view, stage),
            Self::Forwarding => hazards::forwarding(view, stage),
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Ready,
    Finished,
}

/// One simulation run of one policy over a shared program.
///
/// The program is read-only and may be shared with other runs; occupancy,
/// completion times and statistics belong to this run alone.
#[derive(Debug, Clone)]
pub struct Pipeline {
    kind: PipelineKind,
    program: Arc<Program>,
    slots: StageSlots,
    completion: Vec<Option<u64>>,
    next_fetch: usize,
    retired: usize,
    cycle: u64,
    stats: PipelineStats,
    state: RunState,
}

impl Pipeline {
    /// Creates a run of `kind` over an empty program.
    pub fn new(kind: PipelineKind) -> Self {
        Self::with_program(kind, Arc::new(Program::default()))
    }

    /// Creates a run of `kind` over an already-built shared program.
    pub fn with_program(kind: PipelineKind, program: Arc<Program>) -> Self {
        let completion = vec![None; program.len()];
        Self {
            kind,
            program,
            slots: StageSlots::new(),
            completion,
            next_fetch: 0,
            retired: 0,
            cycle: 0,
            stats: PipelineStats::default(),
            state: RunState::Ready,
        }
    }

    /// Ingests `instructions` into a fresh dependence tracker and resets the run.
    pub fn initialize(&mut self, instructions: Vec<Instruction>) {
        self.initialize_shared(Arc::new(Program::new(instructions)));
    }

    /// Resets the run to schedule a program whose dependences were computed elsewhere.
    pub fn initialize_shared(&mut self, program: Arc<Program>) {
        *self = Self::with_program(self.kind, program);
    }

    /// Runs the simulation until every instruction has left Writeback.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::AlreadyExecuted`] if the run already finished;
    /// call [`Pipeline::initialize`] first to schedule again.
    pub fn execute(&mut self) -> Result<(), PipelineError> {
        if self.state == RunState::Finished {
            return Err(PipelineError::AlreadyExecuted { kind: self.kind });
        }
        while !self.is_finished() {
            self.tick();
        }
        self.state = RunState::Finished;
        debug!(
            pipeline = %self.kind,
            cycles = self.cycle,
            total_time = self.total_time(),
            "run complete"
        );
        Ok(())
    }

    /// Advances the pipeline by one cycle.
    ///
    /// Does nothing once every instruction has retired.
    pub fn tick(&mut self) {
        if self.is_finished() {
            return;
        }

        let retired = self.retire();
        // Draining the last instruction ends the run; the cycle count then equals the total time.
        if self.is_finished() {
            return;
        }
        let mut data_stall = false;
        let mut control_stall = false;

        for stage in Stage::ALL.into_iter().rev() {
            let admission = {
                let view = HazardView {
                    slots: &self.slots,
                    retired,
                    program: &self.program,
                };
                self.kind.admission(&view, stage)
            };

            match admission {
                Admission::Admit => self.advance_into(stage),
                Admission::Occupied => {}
                Admission::DataHazard { producer, consumer } => {
                    data_stall = true;
                    debug!(
                        pipeline = %self.kind,
                        cycle = self.cycle,
                        %stage,
                        producer,
                        consumer,
                        "data hazard stall"
                    );
                }
                Admission::ControlHazard { branch } => {
                    if self.next_fetch < self.program.len() {
                        control_stall = true;
                        debug!(
                            pipeline = %self.kind,
                            cycle = self.cycle,
                            branch,
                            "fetch blocked by unresolved control transfer"
                        );
                    }
                }
            }
        }

        self.stats.record_cycle(data_stall, control_stall);
        trace!(pipeline = %self.kind, cycle = self.cycle, slots = %self.slots, "cycle");
        self.cycle += 1;
    }

    /// Drains Writeback, stamping the completion time of what it held.
    fn retire(&mut self) -> Option<usize> {
        let idx = self.slots.take(Stage::Writeback)?;
        if let Some(slot) = self.completion.get_mut(idx) {
            *slot = Some(self.cycle);
        }
        self.retired += 1;
        self.stats.instructions_retired += 1;
        debug!(pipeline = %self.kind, cycle = self.cycle, instruction = idx, "retired");
        Some(idx)
    }

    /// Moves the instruction behind `stage` into it, or fetches into Fetch.
    fn advance_into(&mut self, stage: Stage) {
        match stage.prev() {
            Some(prev) => {
                if let Some(idx) = self.slots.take(prev) {
                    self.slots.place(stage, idx);
                }
            }
            None => {
                if self.next_fetch < self.program.len() {
                    self.slots.place(Stage::Fetch, self.next_fetch);
                    self.next_fetch += 1;
                }
            }
        }
    }

    /// Policy of this run.
    pub const fn kind(&self) -> PipelineKind {
        self.kind
    }

    /// Program being scheduled.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Current stage occupancy.
    pub const fn slots(&self) -> &StageSlots {
        &self.slots
    }

    /// Number of cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether every instruction has retired.
    pub fn is_finished(&self) -> bool {
        self.retired == self.program.len()
    }

    /// Completion time of instruction `index`, once it has retired.
    pub fn completion_time(&self, index: usize) -> Option<u64> {
        self.completion.get(index).copied().flatten()
    }

    /// Completion times in program order.
    pub fn completion_times(&self) -> &[Option<u64>] {
        &self.completion
    }

    /// Completion time of the last instruction, or 0 for an empty program.
    pub fn total_time(&self) -> u64 {
        self.completion.last().copied().flatten().unwrap_or(0)
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Builds the diagnostic report of this run.
    ///
    /// Reporting has no side effects; calling it repeatedly yields identical results.
    pub fn report(&self) -> PipelineReport {
        let timings = self
            .program
            .instructions()
            .iter()
            .enumerate()
            .map(|(index, inst)| InstructionTiming {
                index,
                completion_time: self.completion_time(index),
                text: inst.text().to_owned(),
            })
            .collect();
        let raw_dependences = self
            .program
            .dependences()
            .raw_dependences()
            .map(|d| RawDependence {
                producer: d.producer,
                consumer: d.consumer,
                register: d.register,
            })
            .collect();

        PipelineReport {
            kind: self.kind,
            timings,
            raw_dependences,
            total_time: self.total_time(),
            stats: self.stats.clone(),
        }
    }
}
