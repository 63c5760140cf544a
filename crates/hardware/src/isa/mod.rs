//! Instruction set definitions.
//!
//! This module describes the operations the pipeline schedules:
//! 1. **Opcodes:** The metadata table (format, operand shape, mnemonic, classification).
//! 2. **Instruction Record:** The immutable decoded instruction and its register-access roles.

/// Immutable decoded instruction record.
pub mod instruction;

/// Opcode metadata table.
pub mod opcodes;

pub use instruction::{Format, Instruction, Operands};
pub use opcodes::{Opcode, OperandShape};
