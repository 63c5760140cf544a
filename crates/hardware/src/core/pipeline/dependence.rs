//! Register dependence tracking.
//!
//! Keeps, for each architectural register, the most recent access (read or write)
//! and the program-order index of the instruction that made it. As instructions
//! are submitted in program order, every read-after-write, write-after-read and
//! write-after-write hazard is appended to an immutable log.
//!
//! Only RAW records influence scheduling. In-order single issue cannot violate a
//! WAR or WAW ordering, so those are kept for reporting.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::common::reg::{NUM_REGISTERS, Register};
use crate::isa::instruction::Instruction;

/// Kind of register hazard between two instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DependenceKind {
    /// Read after write (true dependence).
    Raw,
    /// Write after read (anti-dependence).
    War,
    /// Write after write (output dependence).
    Waw,
}

impl fmt::Display for DependenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "RAW",
            Self::War => "WAR",
            Self::Waw => "WAW",
        })
    }
}

/// One detected hazard. `producer < consumer` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Dependence {
    /// Hazard kind.
    pub kind: DependenceKind,
    /// Register both instructions touch.
    pub register: Register,
    /// Program-order index of the earlier instruction.
    pub producer: usize,
    /// Program-order index of the later instruction.
    pub consumer: usize,
}

impl fmt::Display for Dependence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \t{} \t({}, {})",
            self.kind, self.register, self.producer, self.consumer
        )
    }
}

/// Most recent access to one register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Not accessed by any submitted instruction.
    #[default]
    Untouched,
    /// Last read by the instruction at this index.
    Read(usize),
    /// Last written by the instruction at this index.
    Write(usize),
}

/// Per-register access state plus the append-only hazard log.
///
/// One tracker belongs to one program; it is never shared across programs.
#[derive(Clone, Debug)]
pub struct DependenceTracker {
    registers: [RegisterAccess; NUM_REGISTERS],
    dependences: Vec<Dependence>,
    /// (producer, consumer) pairs of every RAW record, for constant-time lookup.
    raw_pairs: HashSet<(usize, usize)>,
    next_index: usize,
}

impl Default for DependenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DependenceTracker {
    /// Creates a tracker with every register untouched and no instructions submitted.
    pub fn new() -> Self {
        Self {
            registers: [RegisterAccess::Untouched; NUM_REGISTERS],
            dependences: Vec::new(),
            raw_pairs: HashSet::new(),
            next_index: 0,
        }
    }

    /// Submits the next instruction in program order and returns its index.
    ///
    /// Source operands are processed before the destination so an instruction
    /// that reads and writes the same register does not depend on itself.
    pub fn submit(&mut self, inst: &Instruction) -> usize {
        let index = self.next_index;
        for reg in inst.register_reads() {
            self.record_read(reg, index);
        }
        if let Some(reg) = inst.register_write() {
            self.record_write(reg, index);
        }
        self.next_index += 1;
        index
    }

    /// Whether a RAW hazard was recorded from `producer` to `consumer`.
    pub fn is_raw(&self, producer: usize, consumer: usize) -> bool {
        self.raw_pairs.contains(&(producer, consumer))
    }

    /// Every hazard in detection order.
    pub fn dependences(&self) -> &[Dependence] {
        &self.dependences
    }

    /// RAW hazards in detection order.
    pub fn raw_dependences(&self) -> impl Iterator<Item = &Dependence> {
        self.dependences
            .iter()
            .filter(|d| d.kind == DependenceKind::Raw)
    }

    /// Most recent access to `reg`.
    pub fn last_access(&self, reg: Register) -> RegisterAccess {
        self.registers[reg.index()]
    }

    /// Number of instructions submitted so far.
    pub const fn len(&self) -> usize {
        self.next_index
    }

    /// Whether no instruction has been submitted.
    pub const fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    fn record_read(&mut self, reg: Register, index: usize) {
        if let RegisterAccess::Write(producer) = self.registers[reg.index()] {
            self.push(DependenceKind::Raw, reg, producer, index);
        }
        self.registers[reg.index()] = RegisterAccess::Read(index);
    }

    fn record_write(&mut self, reg: Register, index: usize) {
        // An instruction never depends on its own source operands.
        match self.registers[reg.index()] {
            RegisterAccess::Read(producer) if producer != index => {
                self.push(DependenceKind::War, reg, producer, index);
            }
            RegisterAccess::Write(producer) if producer != index => {
                self.push(DependenceKind::Waw, reg, producer, index);
            }
            _ => {}
        }
        self.registers[reg.index()] = RegisterAccess::Write(index);
    }

    fn push(&mut self, kind: DependenceKind, register: Register, producer: usize, consumer: usize) {
        if kind == DependenceKind::Raw {
            let _ = self.raw_pairs.insert((producer, consumer));
        }
        self.dependences.push(Dependence {
            kind,
            register,
            producer,
            consumer,
        });
    }
}
