//! The decoded instruction record.
//!
//! An [`Instruction`] is built once by a front end and never mutated afterwards.
//! Pipeline runs refer to instructions by program-order index and keep their
//! own completion times, so one program can be shared by every policy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::OperandError;
use crate::common::reg::Register;
use crate::isa::opcodes::{Opcode, OperandShape};

/// Encoding format of an instruction.
///
/// The format decides which register slots the dependence tracker treats as
/// reads and which as the write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Format {
    /// Three-register form: reads `rs` and `rt`, writes `rd`.
    #[serde(alias = "R", alias = "RegisterForm")]
    Register,
    /// Register-immediate form: reads `rs`, writes the `rt` slot.
    #[serde(alias = "I", alias = "ImmediateForm")]
    Immediate,
    /// Jump form: no register operands.
    #[serde(alias = "J", alias = "JumpForm")]
    Jump,
}

/// Raw operand fields handed over by a front end.
///
/// Slots the opcode does not use must be `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// First source register.
    pub rs: Option<Register>,
    /// Second source register (the destination slot for immediate-form opcodes).
    pub rt: Option<Register>,
    /// Destination register.
    pub rd: Option<Register>,
    /// Shift amount, arithmetic constant, byte offset, or target address.
    pub imm: i32,
}

/// One decoded operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    opcode: Opcode,
    format: Format,
    source_reg1: Option<Register>,
    source_reg2: Option<Register>,
    dest_reg: Option<Register>,
    immediate: i32,
    text: String,
    encoding: Option<String>,
}

impl Instruction {
    /// Builds an instruction, checking that exactly the register slots of the
    /// opcode's shape are present.
    ///
    /// The textual form is reconstructed from the operands; use
    /// [`Instruction::with_text`] to keep the front end's original line instead.
    ///
    /// # Errors
    ///
    /// Returns [`OperandError`] when a required slot is absent or an unused slot
    /// is present.
    pub fn new(opcode: Opcode, operands: Operands) -> Result<Self, OperandError> {
        let shape = opcode.shape();
        check_slot(opcode, "rs", shape.uses_rs(), operands.rs)?;
        check_slot(opcode, "rt", shape.uses_rt(), operands.rt)?;
        check_slot(opcode, "rd", shape.uses_rd(), operands.rd)?;

        Ok(Self {
            opcode,
            format: opcode.format(),
            source_reg1: operands.rs,
            source_reg2: operands.rt,
            dest_reg: operands.rd,
            immediate: operands.imm,
            text: render(opcode, &operands),
            encoding: None,
        })
    }

    /// Replaces the textual form with the line the front end decoded.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attaches the 32-bit field string of the instruction.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// The operation.
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The encoding format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// First source register (`rs`).
    pub const fn source_reg1(&self) -> Option<Register> {
        self.source_reg1
    }

    /// Second source register (`rt`).
    pub const fn source_reg2(&self) -> Option<Register> {
        self.source_reg2
    }

    /// Destination register (`rd`).
    pub const fn dest_reg(&self) -> Option<Register> {
        self.dest_reg
    }

    /// Immediate field, already adjusted for the addressing mode.
    pub const fn immediate(&self) -> i32 {
        self.immediate
    }

    /// Human-readable form.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 32-bit field string, if the front end supplied one.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Whether the instruction accesses data memory.
    pub const fn is_memory_access(&self) -> bool {
        self.opcode.is_memory_access()
    }

    /// Whether the instruction redirects the program counter.
    pub const fn is_control_transfer(&self) -> bool {
        self.opcode.is_control_transfer()
    }

    /// Registers the instruction reads, in the order they are evaluated.
    pub fn register_reads(&self) -> impl Iterator<Item = Register> + use<> {
        let slots = match self.format {
            Format::Register => [self.source_reg1, self.source_reg2],
            Format::Immediate => [self.source_reg1, None],
            Format::Jump => [None, None],
        };
        slots.into_iter().flatten()
    }

    /// Register the instruction writes, if any.
    ///
    /// Immediate-form instructions encode their destination in the `rt` slot.
    pub const fn register_write(&self) -> Option<Register> {
        match self.format {
            Format::Register => self.dest_reg,
            Format::Immediate => self.source_reg2,
            Format::Jump => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn check_slot(
    opcode: Opcode,
    slot: &'static str,
    required: bool,
    value: Option<Register>,
) -> Result<(), OperandError> {
    match (required, value.is_some()) {
        (true, false) => Err(OperandError::Missing { opcode, slot }),
        (false, true) => Err(OperandError::Unexpected { opcode, slot }),
        _ => Ok(()),
    }
}

fn render(opcode: Opcode, ops: &Operands) -> String {
    let reg = |r: Option<Register>| r.map_or_else(|| "$?".to_owned(), |r| r.to_string());
    let (rs, rt, rd, imm) = (reg(ops.rs), reg(ops.rt), reg(ops.rd), ops.imm);
    let op = opcode.mnemonic();
    match opcode.shape() {
        OperandShape::RdRsRt => format!("{op} {rd}, {rs}, {rt}"),
        OperandShape::RsRt => format!("{op} {rs}, {rt}"),
        OperandShape::Rd => format!("{op} {rd}"),
        OperandShape::RdRtShamt => format!("{op} {rd}, {rt}, {imm}"),
        OperandShape::RtRsImm => format!("{op} {rt}, {rs}, {imm}"),
        OperandShape::RsRtLabel => format!("{op} {rs}, {rt}, {imm}"),
        OperandShape::RtOffsetRs => format!("{op} {rt}, {imm}({rs})"),
        OperandShape::Label => format!("{op} {imm}"),
    }
}
