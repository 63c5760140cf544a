//! Program and configuration loading.
//!
//! This module is the validation boundary of the simulator. It performs:
//! 1. **File loading:** Reads a JSON program or configuration file from disk.
//! 2. **Record validation:** Checks register ranges, the format against the opcode,
//!    the operand slots against the opcode's shape, and the encoding string.
//! 3. **Decoding:** Turns validated records into immutable [`Instruction`]s.
//!
//! A program file is a JSON array of records:
//!
//! ```json
//! [
//!   { "opcode": "lw",  "format": "ImmediateForm", "rs": 1, "rt": 2, "imm": 0 },
//!   { "opcode": "add", "rs": 2, "rt": 1, "rd": 3, "text": "add $3, $2, $1" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::common::error::LoadError;
use crate::common::reg::{NUM_REGISTERS, Register};
use crate::config::Config;
use crate::isa::instruction::{Format, Instruction, Operands};
use crate::isa::opcodes::Opcode;

/// Width of an instruction encoding string, one character per bit.
const ENCODING_WIDTH: usize = 32;

/// One instruction as written in a program file, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionRecord {
    /// Operation mnemonic.
    pub opcode: Opcode,
    /// Encoding format; inferred from the opcode when absent.
    #[serde(default)]
    pub format: Option<Format>,
    /// First source register number.
    #[serde(default)]
    pub rs: Option<u8>,
    /// Second source register number.
    #[serde(default)]
    pub rt: Option<u8>,
    /// Destination register number.
    #[serde(default)]
    pub rd: Option<u8>,
    /// Shift amount, constant, offset, or target.
    #[serde(default)]
    pub imm: i32,
    /// Original source line.
    #[serde(default)]
    pub text: Option<String>,
    /// 32-character field string.
    #[serde(default)]
    pub encoding: Option<String>,
}

impl InstructionRecord {
    /// Validates the record and builds the instruction it describes.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidInstruction`] tagged with `index` when the
    /// record is malformed.
    pub fn decode(self, index: usize) -> Result<Instruction, LoadError> {
        let invalid = |reason: String| LoadError::InvalidInstruction { index, reason };

        if let Some(format) = self.format.filter(|&f| f != self.opcode.format()) {
            return Err(invalid(format!(
                "{} is a {:?} instruction, not {:?}",
                self.opcode,
                self.opcode.format(),
                format
            )));
        }

        let operands = Operands {
            rs: register(self.rs, "rs").map_err(&invalid)?,
            rt: register(self.rt, "rt").map_err(&invalid)?,
            rd: register(self.rd, "rd").map_err(&invalid)?,
            imm: self.imm,
        };

        let mut inst =
            Instruction::new(self.opcode, operands).map_err(|e| invalid(e.to_string()))?;

        if let Some(text) = self.text {
            inst = inst.with_text(text);
        }
        if let Some(encoding) = self.encoding {
            check_encoding(&encoding).map_err(&invalid)?;
            inst = inst.with_encoding(encoding);
        }
        Ok(inst)
    }
}

fn register(number: Option<u8>, slot: &str) -> Result<Option<Register>, String> {
    number
        .map(|n| {
            Register::new(n).ok_or_else(|| {
                format!("{slot} register {n} is out of range (0..{NUM_REGISTERS})")
            })
        })
        .transpose()
}

fn check_encoding(encoding: &str) -> Result<(), String> {
    if encoding.len() != ENCODING_WIDTH {
        return Err(format!(
            "encoding has {} characters, expected {ENCODING_WIDTH}",
            encoding.len()
        ));
    }
    if !encoding.bytes().all(|b| b == b'0' || b == b'1') {
        return Err("encoding may contain only '0' and '1'".to_owned());
    }
    Ok(())
}

/// Validates a sequence of records in program order.
///
/// # Errors
///
/// Returns the first [`LoadError::InvalidInstruction`] encountered.
pub fn decode_records(records: Vec<InstructionRecord>) -> Result<Vec<Instruction>, LoadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.decode(index))
        .collect()
}

/// Parses and validates a JSON program held in memory.
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for malformed JSON and
/// [`LoadError::InvalidInstruction`] for malformed records.
pub fn parse_program(json: &str, origin: &Path) -> Result<Vec<Instruction>, LoadError> {
    let records: Vec<InstructionRecord> =
        serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
    decode_records(records)
}

/// Loads and validates a JSON program file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the errors
/// of [`parse_program`].
pub fn load_program(path: &Path) -> Result<Vec<Instruction>, LoadError> {
    let json = read(path)?;
    let program = parse_program(&json, path)?;
    debug!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

/// Loads a JSON configuration file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] or [`LoadError::Parse`].
pub fn load_config(path: &Path) -> Result<Config, LoadError> {
    let json = read(path)?;
    let config = serde_json::from_str(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
