//! Stage admission rules and hazard detection.
//!
//! Each cycle the engine asks, for every stage from Writeback down to Fetch,
//! whether that stage may accept the instruction behind it. This module answers
//! that question for each pipeline policy. It provides:
//! 1. **Base Rule:** A stage admits exactly when it is vacant (the ideal pipeline).
//! 2. **Stall Rule:** Without forwarding, a consumer waits in Decode until its producer has retired.
//! 3. **Forwarding Rule:** Only a load feeding the very next instruction costs a bubble.
//! 4. **Control Rule:** Fetch pauses while a branch or jump sits in Decode.
//!
//! The predicates are pure functions of a [`HazardView`]; they never mutate state.

use crate::core::pipeline::latches::{Stage, StageSlots};
use crate::core::pipeline::program::Program;

/// Stage where a stalling pipeline reads its source operands.
pub const STALL_OPERAND_NEEDED: Stage = Stage::Decode;

/// Stage where a forwarding pipeline consumes its source operands.
pub const FORWARD_OPERAND_NEEDED: Stage = Stage::Execute;

/// Stage at whose end a branch or jump target is known.
pub const JUMP_TARGET_RESOLVED: Stage = Stage::Decode;

/// Outcome of asking a stage to accept the instruction behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Advance the upstream instruction (or fetch a new one).
    Admit,
    /// The stage still holds an instruction.
    Occupied,
    /// A RAW hazard holds the consumer where it is.
    DataHazard {
        /// Index of the instruction writing the register.
        producer: usize,
        /// Index of the instruction waiting to read it.
        consumer: usize,
    },
    /// Fetch is paused until a control transfer resolves its target.
    ControlHazard {
        /// Index of the unresolved branch or jump.
        branch: usize,
    },
}

impl Admission {
    /// Whether the stage accepts an instruction this cycle.
    #[inline]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Read-only snapshot the admission rules inspect.
///
/// `slots` reflects the moves already made this cycle: stages are visited from
/// Writeback down to Fetch, so every stage downstream of the one being asked
/// has already advanced.
#[derive(Clone, Copy, Debug)]
pub struct HazardView<'a> {
    /// Current stage occupancy.
    pub slots: &'a StageSlots,
    /// Instruction drained from Writeback at the start of this cycle, if any.
    pub retired: Option<usize>,
    /// Program being scheduled.
    pub program: &'a Program,
}

impl HazardView<'_> {
    /// First RAW producer among `producers` that `consumer` depends on.
    fn raw_producer(
        &self,
        consumer: usize,
        producers: impl IntoIterator<Item = Option<usize>>,
    ) -> Option<usize> {
        producers
            .into_iter()
            .flatten()
            .find(|&producer| self.program.is_raw(producer, consumer))
    }
}

/// Ideal pipeline: a stage admits whenever it is vacant.
pub const fn ideal(view: &HazardView<'_>, stage: Stage) -> Admission {
    if view.slots.is_vacant(stage) {
        Admission::Admit
    } else {
        Admission::Occupied
    }
}

/// Pipeline without forwarding.
///
/// An instruction leaves Decode for Execute only once every producer it reads
/// from has retired in an earlier cycle; a value written back becomes readable
/// in the following cycle's Decode.
pub fn stall(view: &HazardView<'_>, stage: Stage) -> Admission {
    let base = ideal(view, stage);
    if !base.is_admitted() {
        return base;
    }
    if stage == Stage::Fetch {
        return control_hazard(view).unwrap_or(Admission::Admit);
    }
    if stage.prev() != Some(STALL_OPERAND_NEEDED) {
        return Admission::Admit;
    }

    let Some(consumer) = view.slots.get(STALL_OPERAND_NEEDED) else {
        return Admission::Admit;
    };
    let in_flight = [
        view.slots.get(Stage::Memory),
        view.slots.get(Stage::Writeback),
        view.retired,
    ];
    view.raw_producer(consumer, in_flight)
        .map_or(Admission::Admit, |producer| Admission::DataHazard {
            producer,
            consumer,
        })
}

/// Pipeline with full forwarding.
///
/// Arithmetic results forward from the end of Execute straight into the next
/// instruction's Execute. A memory-access producer only has its value at the
/// end of Memory, so a dependent instruction directly behind it keeps Execute
/// for one extra cycle.
pub fn forwarding(view: &HazardView<'_>, stage: Stage) -> Admission {
    let base = ideal(view, stage);
    if !base.is_admitted() {
        return base;
    }
    if stage == Stage::Fetch {
        return control_hazard(view).unwrap_or(Admission::Admit);
    }
    if stage.prev() != Some(FORWARD_OPERAND_NEEDED) {
        return Admission::Admit;
    }

    let Some(consumer) = view.slots.get(FORWARD_OPERAND_NEEDED) else {
        return Admission::Admit;
    };
    // The instruction one step ahead has just moved into Writeback.
    let ahead = view.slots.get(Stage::Writeback).filter(|&producer| {
        view.program
            .get(producer)
            .is_some_and(|inst| inst.is_memory_access())
    });
    view.raw_producer(consumer, [ahead])
        .map_or(Admission::Admit, |producer| Admission::DataHazard {
            producer,
            consumer,
        })
}

/// Shared fetch gate of the stall and forwarding pipelines.
///
/// Returns the blocking instruction when a control transfer sits between Fetch
/// and the stage that resolves its target, since the next program counter is
/// not yet known.
pub fn control_hazard(view: &HazardView<'_>) -> Option<Admission> {
    Stage::ALL[Stage::Decode.index()..=JUMP_TARGET_RESOLVED.index()]
        .iter()
        .filter_map(|&stage| view.slots.get(stage))
        .find(|&idx| {
            view.program
                .get(idx)
                .is_some_and(|inst| inst.is_control_transfer())
        })
        .map(|branch| Admission::ControlHazard { branch })
}
