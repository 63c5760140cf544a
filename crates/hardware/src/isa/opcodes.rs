//! Opcode metadata table.
//!
//! Every supported operation is described by a single row: its encoding shape,
//! its assembly mnemonic, and the two classification bits the hazard policies
//! care about (memory access and control transfer).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::instruction::Format;

/// Operand layout of an opcode, in assembly order.
///
/// The shape decides which of the `rs`/`rt`/`rd` slots an instruction uses
/// and how its textual form is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandShape {
    /// `op rd, rs, rt`
    RdRsRt,
    /// `op rs, rt`
    RsRt,
    /// `op rd`
    Rd,
    /// `op rd, rt, shamt`
    RdRtShamt,
    /// `op rt, rs, imm`
    RtRsImm,
    /// `op rt, imm(rs)`
    RtOffsetRs,
    /// `op rs, rt, label`
    RsRtLabel,
    /// `op label`
    Label,
}

impl OperandShape {
    /// Whether the shape names an `rs` operand.
    pub const fn uses_rs(self) -> bool {
        matches!(
            self,
            Self::RdRsRt | Self::RsRt | Self::RtRsImm | Self::RtOffsetRs | Self::RsRtLabel
        )
    }

    /// Whether the shape names an `rt` operand.
    pub const fn uses_rt(self) -> bool {
        !matches!(self, Self::Rd | Self::Label)
    }

    /// Whether the shape names an `rd` operand.
    pub const fn uses_rd(self) -> bool {
        matches!(self, Self::RdRsRt | Self::Rd | Self::RdRtShamt)
    }
}

/// Supported operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// Signed addition.
    Add,
    /// Signed subtraction.
    Sub,
    /// Set on less than.
    Slt,
    /// Multiply into HI/LO.
    Mult,
    /// Divide into HI/LO.
    Div,
    /// Move from HI.
    Mfhi,
    /// Move from LO.
    Mflo,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Add immediate.
    Addi,
    /// Load word.
    Lw,
    /// Store word.
    Sw,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Jump.
    J,
    /// Jump and link.
    Jal,
}

impl Opcode {
    /// Every opcode, in table order.
    pub const ALL: [Self; 16] = [
        Self::Add,
        Self::Sub,
        Self::Slt,
        Self::Mult,
        Self::Div,
        Self::Mfhi,
        Self::Mflo,
        Self::Sll,
        Self::Srl,
        Self::Addi,
        Self::Lw,
        Self::Sw,
        Self::Beq,
        Self::Bne,
        Self::J,
        Self::Jal,
    ];

    /// Encoding format the opcode belongs to.
    pub const fn format(self) -> Format {
        match self {
            Self::Add
            | Self::Sub
            | Self::Slt
            | Self::Mult
            | Self::Div
            | Self::Mfhi
            | Self::Mflo
            | Self::Sll
            | Self::Srl => Format::Register,
            Self::Addi | Self::Lw | Self::Sw | Self::Beq | Self::Bne => Format::Immediate,
            Self::J | Self::Jal => Format::Jump,
        }
    }

    /// Operand layout in assembly order.
    pub const fn shape(self) -> OperandShape {
        match self {
            Self::Add | Self::Sub | Self::Slt => OperandShape::RdRsRt,
            Self::Mult | Self::Div => OperandShape::RsRt,
            Self::Mfhi | Self::Mflo => OperandShape::Rd,
            Self::Sll | Self::Srl => OperandShape::RdRtShamt,
            Self::Addi => OperandShape::RtRsImm,
            Self::Lw | Self::Sw => OperandShape::RtOffsetRs,
            Self::Beq | Self::Bne => OperandShape::RsRtLabel,
            Self::J | Self::Jal => OperandShape::Label,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Slt => "slt",
            Self::Mult => "mult",
            Self::Div => "div",
            Self::Mfhi => "mfhi",
            Self::Mflo => "mflo",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Addi => "addi",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::J => "j",
            Self::Jal => "jal",
        }
    }

    /// Whether the opcode accesses data memory.
    ///
    /// A memory-access producer only has its value at the end of the Memory
    /// stage, so forwarding cannot hide a dependence on it from the very next
    /// instruction.
    pub const fn is_memory_access(self) -> bool {
        matches!(self, Self::Lw | Self::Sw)
    }

    /// Whether the opcode redirects the program counter.
    ///
    /// These are exactly the opcodes whose immediate may be a label; the
    /// target is not known until the instruction leaves Decode.
    pub const fn is_control_transfer(self) -> bool {
        matches!(self, Self::Beq | Self::Bne | Self::J | Self::Jal)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
