//! Fluent construction of instruction records for tests.

use pipesim_core::common::reg::Register;
use pipesim_core::isa::instruction::{Instruction, Operands};
use pipesim_core::isa::opcodes::Opcode;

/// Register `n`, panicking when it is out of range.
pub fn reg(n: u8) -> Register {
    Register::new(n).unwrap_or_else(|| panic!("register {n} out of range"))
}

/// Builds an [`Instruction`] one operand at a time.
#[derive(Debug, Clone)]
pub struct InstructionBuilder {
    opcode: Opcode,
    operands: Operands,
    text: Option<String>,
}

impl InstructionBuilder {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Operands::default(),
            text: None,
        }
    }

    pub fn rs(mut self, rs: u8) -> Self {
        self.operands.rs = Some(reg(rs));
        self
    }

    pub fn rt(mut self, rt: u8) -> Self {
        self.operands.rt = Some(reg(rt));
        self
    }

    pub fn rd(mut self, rd: u8) -> Self {
        self.operands.rd = Some(reg(rd));
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.operands.imm = imm;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_owned());
        self
    }

    pub fn build(self) -> Instruction {
        let inst = Instruction::new(self.opcode, self.operands)
            .unwrap_or_else(|e| panic!("invalid test instruction: {e}"));
        match self.text {
            Some(text) => inst.with_text(text),
            None => inst,
        }
    }
}

// --- Helpers for Common Instructions ---

pub fn add(rd: u8, rs: u8, rt: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Add).rd(rd).rs(rs).rt(rt).build()
}

pub fn sub(rd: u8, rs: u8, rt: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Sub).rd(rd).rs(rs).rt(rt).build()
}

pub fn slt(rd: u8, rs: u8, rt: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Slt).rd(rd).rs(rs).rt(rt).build()
}

pub fn mult(rs: u8, rt: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Mult).rs(rs).rt(rt).build()
}

pub fn mflo(rd: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Mflo).rd(rd).build()
}

pub fn sll(rd: u8, rt: u8, shamt: i32) -> Instruction {
    InstructionBuilder::new(Opcode::Sll)
        .rd(rd)
        .rt(rt)
        .imm(shamt)
        .build()
}

pub fn addi(rt: u8, rs: u8, imm: i32) -> Instruction {
    InstructionBuilder::new(Opcode::Addi)
        .rt(rt)
        .rs(rs)
        .imm(imm)
        .build()
}

pub fn lw(rt: u8, offset: i32, rs: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Lw)
        .rt(rt)
        .rs(rs)
        .imm(offset)
        .build()
}

pub fn sw(rt: u8, offset: i32, rs: u8) -> Instruction {
    InstructionBuilder::new(Opcode::Sw)
        .rt(rt)
        .rs(rs)
        .imm(offset)
        .build()
}

pub fn beq(rs: u8, rt: u8, target: i32) -> Instruction {
    InstructionBuilder::new(Opcode::Beq)
        .rs(rs)
        .rt(rt)
        .imm(target)
        .build()
}

pub fn j(target: i32) -> Instruction {
    InstructionBuilder::new(Opcode::J).imm(target).build()
}

pub fn jal(target: i32) -> Instruction {
    InstructionBuilder::new(Opcode::Jal).imm(target).build()
}
