//! Dependence Tracker Tests.

use pipesim_core::core::pipeline::{Dependence, DependenceKind, DependenceTracker, RegisterAccess};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::builder::instruction::{add, addi, j, lw, reg, sub, sw};

fn tracker(program: &[pipesim_core::isa::instruction::Instruction]) -> DependenceTracker {
    let mut tracker = DependenceTracker::new();
    for inst in program {
        let _ = tracker.submit(inst);
    }
    tracker
}

#[test]
fn raw_between_distant_instructions() {
    // $7 written by instruction 2, read by instruction 5, untouched in between.
    let t = tracker(&[
        add(20, 21, 22),
        add(23, 21, 22),
        add(7, 21, 22),
        add(24, 21, 22),
        add(25, 21, 22),
        sub(26, 7, 21),
    ]);

    let on_r7: Vec<&Dependence> = t
        .dependences()
        .iter()
        .filter(|d| d.register == reg(7))
        .collect();
    assert_eq!(
        on_r7,
        vec![&Dependence {
            kind: DependenceKind::Raw,
            register: reg(7),
            producer: 2,
            consumer: 5,
        }]
    );
    assert!(t.is_raw(2, 5));
}

#[test]
fn detection_order_and_kinds() {
    let t = tracker(&[
        add(3, 1, 2),  // 0: writes $3
        sub(4, 3, 1),  // 1: RAW $3 on 0
        add(1, 5, 6),  // 2: WAR $1 on 1
        addi(4, 1, 8), // 3: RAW $1 on 2, WAW $4 on 1
    ]);

    let kinds: Vec<(DependenceKind, usize, usize)> = t
        .dependences()
        .iter()
        .map(|d| (d.kind, d.producer, d.consumer))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (DependenceKind::Raw, 0, 1),
            (DependenceKind::War, 1, 2),
            (DependenceKind::Raw, 2, 3),
            (DependenceKind::Waw, 1, 3),
        ]
    );
    assert_eq!(t.raw_dependences().count(), 2);
}

#[test]
fn store_and_load_use_base_register_as_source() {
    let t = tracker(&[lw(2, 0, 1), sw(5, 4, 2)]);
    assert!(t.is_raw(0, 1));
    assert_eq!(t.last_access(reg(5)), RegisterAccess::Write(1));
}

#[test]
fn reading_and_writing_the_same_register_is_not_a_self_hazard() {
    let t = tracker(&[add(1, 1, 1), add(2, 5, 6), lw(2, 0, 2)]);

    assert_eq!(
        t.dependences(),
        &[Dependence {
            kind: DependenceKind::Raw,
            register: reg(2),
            producer: 1,
            consumer: 2,
        }]
    );
    assert!(t.dependences().iter().all(|d| d.producer < d.consumer));
    assert_eq!(t.last_access(reg(1)), RegisterAccess::Write(0));
    assert_eq!(t.last_access(reg(2)), RegisterAccess::Write(2));
}

#[test]
fn jump_touches_no_register() {
    let t = tracker(&[add(3, 1, 2), j(64), sub(4, 3, 1)]);
    assert!(t.is_raw(0, 2));
    assert_eq!(t.dependences().len(), 1);
    assert_eq!(t.len(), 3);
}

proptest! {
    #[test]
    fn dependences_always_point_backwards(
        ops in prop::collection::vec((0u8..8, 0u8..8, 0u8..8), 0..24)
    ) {
        let program: Vec<_> = ops.iter().map(|&(rd, rs, rt)| add(rd, rs, rt)).collect();
        let t = tracker(&program);

        for d in t.dependences() {
            prop_assert!(d.producer < d.consumer);
            prop_assert!(d.consumer < program.len());
        }
        prop_assert_eq!(t.len(), program.len());
    }
}
