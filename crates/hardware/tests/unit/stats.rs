//! Statistics Tests.

use pipesim_core::core::pipeline::PipelineKind;

use crate::common::builder::instruction::{add, j, sub};
use crate::common::harness::TestContext;

#[test]
fn stall_and_control_cycles_are_counted_separately() {
    let ctx = TestContext::new(vec![add(3, 1, 2), sub(4, 3, 1), j(8), add(5, 6, 7)]);
    let stats = ctx.run(PipelineKind::Forwarding).stats().clone();

    assert_eq!(stats.stalls_data, 0);
    assert_eq!(stats.stalls_control, 1);
    assert_eq!(stats.instructions_retired, 4);
}

#[test]
fn ideal_cpi_approaches_one() {
    let program = (0..20).map(|_| add(3, 1, 2)).collect();
    let ctx = TestContext::new(program);
    let stats = ctx.run(PipelineKind::Ideal).stats().clone();

    assert_eq!(stats.cycles, 24);
    assert!((stats.cpi() - 1.2).abs() < 1e-9);
}

#[test]
fn display_lists_every_counter() {
    let ctx = TestContext::new(vec![add(3, 1, 2), sub(4, 3, 1)]);
    let text = ctx.run(PipelineKind::Stall).stats().to_string();

    assert!(text.contains("sim_cycles               9"));
    assert!(text.contains("sim_insts                2"));
    assert!(text.contains("stalls.data              3"));
    assert!(text.contains("stalls.control           0"));
}
