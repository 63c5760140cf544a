//! The shared, read-only program a pipeline run schedules.
//!
//! Instructions live in an append-only arena and are identified everywhere else
//! (stage slots, dependence records, completion times) by their program-order
//! index. Dependences are computed once when the program is built.

use crate::core::pipeline::dependence::DependenceTracker;
use crate::isa::instruction::Instruction;

/// A validated instruction sequence together with its dependence log.
#[derive(Clone, Debug, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    dependences: DependenceTracker,
}

impl Program {
    /// Submits every instruction to a fresh tracker in program order.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let mut dependences = DependenceTracker::new();
        for (position, inst) in instructions.iter().enumerate() {
            let index = dependences.submit(inst);
            debug_assert_eq!(index, position);
        }
        Self {
            instructions,
            dependences,
        }
    }

    /// The instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Instruction at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Dependence log of the program.
    pub const fn dependences(&self) -> &DependenceTracker {
        &self.dependences
    }

    /// Whether `consumer` reads a value `producer` writes.
    pub fn is_raw(&self, producer: usize, consumer: usize) -> bool {
        self.dependences.is_raw(producer, consumer)
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
