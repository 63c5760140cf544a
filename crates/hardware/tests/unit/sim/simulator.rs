//! Multi-Policy Simulator Tests.

use pipesim_core::config::{Config, PipelineConfig};
use pipesim_core::core::pipeline::PipelineKind;
use pipesim_core::sim::Simulator;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::{add, j, lw, sub};
use crate::common::harness::init_tracing;

fn config(policies: Vec<PipelineKind>, parallel: bool) -> Config {
    Config {
        pipeline: PipelineConfig { policies, parallel },
        ..Config::default()
    }
}

fn program() -> Vec<pipesim_core::isa::instruction::Instruction> {
    vec![lw(2, 0, 1), add(3, 2, 1), j(32), sub(4, 3, 2)]
}

#[test]
fn runs_every_policy_in_order_by_default() {
    init_tracing();
    let sim = Simulator::new(program(), &Config::default());
    let reports = sim.run().unwrap();

    let kinds: Vec<PipelineKind> = reports.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, PipelineKind::ALL.to_vec());
    assert_eq!(reports[0].total_time, 8);
    assert_eq!(sim.program().len(), 4);
}

#[test]
fn parallel_matches_sequential() {
    init_tracing();
    let sequential = Simulator::new(program(), &config(Vec::new(), false))
        .run()
        .unwrap();
    let parallel = Simulator::new(program(), &config(Vec::new(), true))
        .run()
        .unwrap();

    assert_eq!(parallel, sequential);
}

#[test]
fn selection_order_is_preserved() {
    let sim = Simulator::new(
        program(),
        &config(vec![PipelineKind::Forwarding, PipelineKind::Stall], true),
    );
    assert_eq!(
        sim.policies(),
        &[PipelineKind::Forwarding, PipelineKind::Stall]
    );

    let reports = sim.run().unwrap();
    assert_eq!(reports[0].kind, PipelineKind::Forwarding);
    assert_eq!(reports[1].kind, PipelineKind::Stall);
}

#[test]
fn empty_program_reports_zero_for_every_policy() {
    let reports = Simulator::new(Vec::new(), &Config::default()).run().unwrap();
    assert!(reports.iter().all(|r| r.total_time == 0 && r.timings.is_empty()));
}
