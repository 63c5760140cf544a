//! Instruction Record Tests.

use pipesim_core::isa::instruction::{Format, Instruction, Operands};
use pipesim_core::isa::opcodes::Opcode;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::{InstructionBuilder, beq, lw, reg, sll, sw};

#[rstest]
#[case("\"R\"", Format::Register)]
#[case("\"RegisterForm\"", Format::Register)]
#[case("\"I\"", Format::Immediate)]
#[case("\"ImmediateForm\"", Format::Immediate)]
#[case("\"J\"", Format::Jump)]
#[case("\"JumpForm\"", Format::Jump)]
fn format_names(#[case] json: &str, #[case] expected: Format) {
    let format: Format = serde_json::from_str(json).unwrap();
    assert_eq!(format, expected);
}

#[test]
fn memory_and_control_classification() {
    assert!(lw(2, 0, 1).is_memory_access());
    assert!(sw(2, 0, 1).is_memory_access());
    assert!(!lw(2, 0, 1).is_control_transfer());
    assert!(beq(1, 2, 8).is_control_transfer());
    assert!(!sll(1, 2, 3).is_memory_access());

    let controls: Vec<Opcode> = Opcode::ALL
        .into_iter()
        .filter(|op| op.is_control_transfer())
        .collect();
    assert_eq!(controls, vec![Opcode::Beq, Opcode::Bne, Opcode::J, Opcode::Jal]);
}

#[test]
fn fields_map_to_source_and_destination_slots() {
    let inst = InstructionBuilder::new(Opcode::Sub).rd(4).rs(3).rt(1).build();

    assert_eq!(inst.format(), Format::Register);
    assert_eq!(inst.source_reg1(), Some(reg(3)));
    assert_eq!(inst.source_reg2(), Some(reg(1)));
    assert_eq!(inst.dest_reg(), Some(reg(4)));
    assert_eq!(inst.register_reads().collect::<Vec<_>>(), vec![reg(3), reg(1)]);
    assert_eq!(inst.register_write(), Some(reg(4)));
}

#[test]
fn shift_reads_only_rt() {
    let inst = sll(4, 3, 2);
    assert_eq!(inst.text(), "sll $4, $3, 2");
    assert_eq!(inst.register_reads().collect::<Vec<_>>(), vec![reg(3)]);
}

#[test]
fn instruction_serializes_with_optional_slots() {
    let inst = Instruction::new(
        Opcode::Jal,
        Operands {
            imm: 4096,
            ..Operands::default()
        },
    )
    .unwrap();
    let json = serde_json::to_value(&inst).unwrap();

    assert_eq!(json["opcode"], "jal");
    assert_eq!(json["format"], "Jump");
    assert!(json["dest_reg"].is_null());
    assert_eq!(json["text"], "jal 4096");
}
