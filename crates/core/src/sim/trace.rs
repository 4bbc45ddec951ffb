//! Instruction trace records and the trace file reader.
//!
//! A trace is plain text with one instruction per line and five
//! whitespace-separated fields:
//!
//! ```text
//! <pc> <opcode> <dst> <src1> <src2>
//! ```
//!
//! The PC is hexadecimal (an optional `0x` prefix is accepted); the remaining
//! fields are signed decimal. A register id of `-1` means "no operand". Blank
//! lines and lines starting with `#` are skipped. Parsing stops at the first
//! malformed record and reports its 1-based line number.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::common::error::{TraceError, TraceErrorKind};

/// Register id in the trace that means "no operand".
pub const NO_REG: i64 = -1;

/// One instruction as read from the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    /// Program counter.
    pub pc: u64,
    /// Opcode (latency class selector).
    pub opcode: u32,
    /// Destination register.
    pub dst: Option<usize>,
    /// First source register.
    pub src1: Option<usize>,
    /// Second source register.
    pub src2: Option<usize>,
}

impl TraceRecord {
    /// Parses one trace line. `line` is the 1-based line number used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Malformed`] on a wrong field count, a non-numeric
    /// field, or a register id below `-1`.
    pub fn parse(text: &str, line: usize) -> Result<Self, TraceError> {
        let malformed = |kind| TraceError::Malformed { line, kind };

        let fields: Vec<&str> = text.split_whitespace().collect();
        let &[pc, opcode, dst, src1, src2] = fields.as_slice() else {
            return Err(malformed(TraceErrorKind::FieldCount {
                found: fields.len(),
            }));
        };

        Ok(Self {
            pc: parse_pc(pc).map_err(malformed)?,
            opcode: opcode
                .parse()
                .map_err(|_| malformed(invalid_number("opcode", opcode)))?,
            dst: parse_reg("dst", dst).map_err(malformed)?,
            src1: parse_reg("src1", src1).map_err(malformed)?,
            src2: parse_reg("src2", src2).map_err(malformed)?,
        })
    }
}

fn invalid_number(field: &'static str, value: &str) -> TraceErrorKind {
    TraceErrorKind::InvalidNumber {
        field,
        value: value.to_string(),
    }
}

fn parse_pc(text: &str) -> Result<u64, TraceErrorKind> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16).map_err(|_| invalid_number("pc", text))
}

fn parse_reg(field: &'static str, text: &str) -> Result<Option<usize>, TraceErrorKind> {
    let value: i64 = text.parse().map_err(|_| invalid_number(field, text))?;
    match value {
        NO_REG => Ok(None),
        v if v >= 0 => Ok(Some(v as usize)),
        v => Err(TraceErrorKind::InvalidRegister { field, value: v }),
    }
}

/// Parses a whole trace held in memory.
///
/// # Errors
///
/// Returns the error for the first malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>, TraceError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| {
            let l = l.trim();
            !l.is_empty() && !l.starts_with('#')
        })
        .map(|(i, l)| TraceRecord::parse(l, i + 1))
        .collect()
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read, or the first parse error.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_trace(&text)?;
    tracing::debug!(path = %path.display(), records = records.len(), "trace loaded");
    Ok(records)
}
