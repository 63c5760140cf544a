//! Pipeline stages and the stage occupancy array.
//!
//! This module defines the fixed five-stage layout:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Stage Identity:** An ordered enum with index arithmetic between neighbouring stages.
//! 2. **Occupancy:** One slot per stage holding the program-order index of its instruction.

use std::fmt;

use serde::Serialize;

/// A pipeline stage, in flow order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    /// Instruction fetch (IF).
    Fetch,
    /// Instruction decode and register read (ID).
    Decode,
    /// Execute / address calculation (EX).
    Execute,
    /// Data memory access (MEM).
    Memory,
    /// Register writeback (WB).
    Writeback,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 5;

    /// Every stage in flow order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];

    /// Position of the stage in flow order (Fetch is 0).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The stage that feeds this one, or `None` for Fetch.
    pub const fn prev(self) -> Option<Self> {
        match self {
            Self::Fetch => None,
            Self::Decode => Some(Self::Fetch),
            Self::Execute => Some(Self::Decode),
            Self::Memory => Some(Self::Execute),
            Self::Writeback => Some(Self::Memory),
        }
    }

    /// Short latch-style label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
            Self::Writeback => "WB",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stage occupancy array: which instruction, if any, sits in each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageSlots {
    slots: [Option<usize>; Stage::COUNT],
}

impl StageSlots {
    /// All stages empty.
    pub const fn new() -> Self {
        Self {
            slots: [None; Stage::COUNT],
        }
    }

    /// Index of the instruction in `stage`.
    #[inline]
    pub const fn get(&self, stage: Stage) -> Option<usize> {
        self.slots[stage.index()]
    }

    /// Whether `stage` holds no instruction.
    #[inline]
    pub const fn is_vacant(&self, stage: Stage) -> bool {
        self.slots[stage.index()].is_none()
    }

    /// Empties `stage`, returning what it held.
    pub fn take(&mut self, stage: Stage) -> Option<usize> {
        self.slots[stage.index()].take()
    }

    /// Places instruction `index` into `stage`, which must be vacant.
    pub fn place(&mut self, stage: Stage, index: usize) {
        debug_assert!(
            self.is_vacant(stage),
            "stage {stage} already holds instruction {:?}",
            self.get(stage)
        );
        self.slots[stage.index()] = Some(index);
    }
}

impl fmt::Display for StageSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, stage) in Stage::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match self.get(stage) {
                Some(idx) => write!(f, "{stage}:{idx}")?,
                None => write!(f, "{stage}:-")?,
            }
        }
        f.write_str("]")
    }
}
