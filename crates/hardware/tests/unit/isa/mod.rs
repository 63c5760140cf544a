/// Instruction record tests.
pub mod instruction;
