//! RAW Stall Tests (no forwarding).
//!
//! Without forwarding a consumer reads its operands in Decode and may only move
//! on to Execute once its producer has written back in an earlier cycle. These
//! tests pin the exact completion times for producers at increasing distance.

use pipesim_core::core::pipeline::PipelineKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::{add, addi, lw, sub};
use crate::common::harness::TestContext;
use pipesim_core::isa::instruction::Instruction;

// ══════════════════════════════════════════════════════════
// 1. Producer distance
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::adjacent(vec![add(3, 1, 2), sub(4, 3, 1)], vec![5, 9])]
#[case::distance_two(vec![add(3, 1, 2), add(5, 6, 7), sub(4, 3, 1)], vec![5, 6, 9])]
#[case::distance_three(
    vec![add(3, 1, 2), add(5, 6, 7), add(8, 6, 7), sub(4, 3, 1)],
    vec![5, 6, 7, 9]
)]
#[case::distance_four(
    vec![add(3, 1, 2), add(5, 6, 7), add(8, 6, 7), add(9, 6, 7), sub(4, 3, 1)],
    vec![5, 6, 7, 8, 9]
)]
#[case::independent(vec![add(3, 1, 2), add(5, 6, 7)], vec![5, 6])]
fn stall_completion_times(#[case] program: Vec<Instruction>, #[case] expected: Vec<u64>) {
    let ctx = TestContext::new(program);
    assert_eq!(ctx.completion_times(PipelineKind::Stall), expected);
}

#[test]
fn adjacent_raw_costs_three_stall_cycles() {
    let ctx = TestContext::new(vec![add(3, 1, 2), sub(4, 3, 1)]);
    let run = ctx.run(PipelineKind::Stall);

    assert_eq!(run.stats().stalls_data, 3);
    assert_eq!(run.total_time(), ctx.total_time(PipelineKind::Ideal) + 3);
}

// ══════════════════════════════════════════════════════════
// 2. Multiple producers and chains
// ══════════════════════════════════════════════════════════

#[test]
fn consumer_waits_for_latest_of_two_producers() {
    // sub reads $3 (two ahead) and $5 (directly ahead).
    let ctx = TestContext::new(vec![add(3, 1, 2), add(5, 1, 2), sub(4, 3, 5)]);
    assert_eq!(ctx.completion_times(PipelineKind::Stall), vec![5, 6, 10]);
}

#[test]
fn dependence_chain_stalls_each_link() {
    let ctx = TestContext::new(vec![add(3, 1, 2), sub(4, 3, 1), add(5, 4, 3)]);
    let run = ctx.run(PipelineKind::Stall);

    assert_eq!(
        run.completion_times().to_vec(),
        vec![Some(5), Some(9), Some(13)]
    );
    assert_eq!(run.stats().stalls_data, 6);
}

#[test]
fn instructions_behind_a_stalled_consumer_hold_position() {
    // The independent third instruction cannot overtake the stalled second one.
    let ctx = TestContext::new(vec![add(3, 1, 2), sub(4, 3, 1), add(8, 6, 7)]);
    assert_eq!(ctx.completion_times(PipelineKind::Stall), vec![5, 9, 10]);
}

// ══════════════════════════════════════════════════════════
// 3. Address and immediate operands
// ══════════════════════════════════════════════════════════

#[test]
fn base_register_of_load_is_a_source() {
    let ctx = TestContext::new(vec![add(1, 2, 3), lw(4, 8, 1)]);
    assert_eq!(ctx.completion_times(PipelineKind::Stall), vec![5, 9]);
}

#[test]
fn immediate_form_writes_rt() {
    let ctx = TestContext::new(vec![addi(6, 1, 10), add(7, 6, 6)]);
    assert_eq!(ctx.completion_times(PipelineKind::Stall), vec![5, 9]);
}
