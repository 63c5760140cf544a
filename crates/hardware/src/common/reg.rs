//! Architectural register identifiers.
//!
//! Register operands are carried as `Option<Register>` everywhere in the crate:
//! `None` marks an operand slot the opcode does not use, which keeps an unused
//! slot from being mistaken for a dependence on `$0`.

use std::fmt;

use serde::Serialize;

/// Number of general-purpose registers in the modeled register file.
pub const NUM_REGISTERS: usize = 32;

/// A general-purpose register index in `0..NUM_REGISTERS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Register(u8);

impl Register {
    /// Creates a register identifier, returning `None` when `index` is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_REGISTERS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the register index as a `usize`, suitable for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
