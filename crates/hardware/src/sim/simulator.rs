//! Simulator: runs the configured pipeline policies over one shared program.
//!
//! The program and its dependences are computed once and shared behind an
//! `Arc`; each policy gets its own [`Pipeline`] with private occupancy and
//! completion times. With `parallel` set, every policy runs on a scoped
//! thread and the reports are collected in configuration order.

use std::sync::Arc;
use std::thread;

use tracing::info;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::engine::{Pipeline, PipelineKind};
use crate::core::pipeline::program::Program;
use crate::core::pipeline::report::PipelineReport;
use crate::isa::instruction::Instruction;

/// Top-level simulator: one program, several policies.
#[derive(Debug, Clone)]
pub struct Simulator {
    program: Arc<Program>,
    policies: Vec<PipelineKind>,
    parallel: bool,
}

impl Simulator {
    /// Creates a simulator for `instructions` using the policy selection of `config`.
    pub fn new(instructions: Vec<Instruction>, config: &Config) -> Self {
        Self::with_program(Arc::new(Program::new(instructions)), config)
    }

    /// Creates a simulator over an already-built program.
    pub fn with_program(program: Arc<Program>, config: &Config) -> Self {
        Self {
            program,
            policies: config.pipeline.selected(),
            parallel: config.pipeline.parallel,
        }
    }

    /// The shared program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Policies run, in reporting order.
    pub fn policies(&self) -> &[PipelineKind] {
        &self.policies
    }

    /// Runs every configured policy and returns their reports in order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::WorkerPanicked`] if a parallel worker panicked, or
    /// the [`PipelineError`](crate::common::error::PipelineError) of a failed run.
    pub fn run(&self) -> Result<Vec<PipelineReport>, SimError> {
        if self.parallel {
            self.run_parallel()
        } else {
            self.policies
                .iter()
                .map(|&kind| run_one(kind, Arc::clone(&self.program)))
                .collect()
        }
    }

    fn run_parallel(&self) -> Result<Vec<PipelineReport>, SimError> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .policies
                .iter()
                .map(|&kind| {
                    let program = Arc::clone(&self.program);
                    (kind, scope.spawn(move || run_one(kind, program)))
                })
                .collect();

            handles
                .into_iter()
                .map(|(kind, handle)| match handle.join() {
                    Ok(result) => result,
                    Err(_) => Err(SimError::WorkerPanicked { kind }),
                })
                .collect()
        })
    }
}

fn run_one(kind: PipelineKind, program: Arc<Program>) -> Result<PipelineReport, SimError> {
    let mut pipeline = Pipeline::with_program(kind, program);
    pipeline.execute()?;
    let report = pipeline.report();
    info!(
        pipeline = %kind,
        total_time = report.total_time,
        cycles = report.stats.cycles,
        "pipeline run finished"
    );
    Ok(report)
}
