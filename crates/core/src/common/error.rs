//! Error definitions for configuration, trace loading, and simulation.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Configuration Errors:** Rejected pipeline parameters, raised before any cycle runs.
//! 2. **Trace Errors:** Malformed trace records, reported with the offending line.
//! 3. **Simulation Errors:** Failures detected while building or driving the pipeline.
//!
//! Internal invariant violations (popping an empty ROB, issuing an entry twice)
//! are programming errors and panic instead of being represented here.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid simulator configuration.
///
/// Raised by [`Config::validate`](crate::config::Config::validate); a pipeline is
/// never constructed from a configuration that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The reorder buffer must hold at least one entry.
    #[error("ROB size must be positive")]
    ZeroRobSize,

    /// The issue queue must hold at least one entry.
    #[error("IQ size must be positive")]
    ZeroIqSize,

    /// The pipeline must move at least one instruction per cycle.
    #[error("pipeline width must be positive")]
    ZeroWidth,

    /// Rename only proceeds with `width` free ROB slots, so a smaller ROB never accepts a bundle.
    #[error("ROB size {rob_size} is smaller than pipeline width {width}")]
    RobSmallerThanWidth {
        /// Configured ROB size.
        rob_size: usize,
        /// Configured pipeline width.
        width: usize,
    },

    /// Dispatch only proceeds with `width` free IQ slots, so a smaller IQ never accepts a bundle.
    #[error("IQ size {iq_size} is smaller than pipeline width {width}")]
    IqSmallerThanWidth {
        /// Configured IQ size.
        iq_size: usize,
        /// Configured pipeline width.
        width: usize,
    },

    /// Every latency class must take at least one cycle.
    #[error("execution latency for {class} must be positive")]
    ZeroLatency {
        /// Human-readable name of the offending latency class.
        class: String,
    },

    /// The rename table needs at least one architectural register.
    #[error("architectural register count must be positive")]
    ZeroRegisters,
}

/// Reason a single trace line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceErrorKind {
    /// A record must have exactly five fields.
    #[error("expected 5 fields, found {found}")]
    FieldCount {
        /// Number of whitespace-separated fields on the line.
        found: usize,
    },

    /// A field could not be parsed as an integer.
    #[error("field `{field}` is not a valid integer: {value:?}")]
    InvalidNumber {
        /// Name of the field (`pc`, `opcode`, `dst`, `src1`, `src2`).
        field: &'static str,
        /// Raw text of the field.
        value: String,
    },

    /// Register ids are non-negative, or `-1` for "no operand".
    #[error("field `{field}` holds invalid register id {value}")]
    InvalidRegister {
        /// Name of the register field.
        field: &'static str,
        /// Parsed value.
        value: i64,
    },
}

/// Failure while reading or parsing an instruction trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A record could not be parsed.
    #[error("trace line {line}: {kind}")]
    Malformed {
        /// 1-based line number in the trace text.
        line: usize,
        /// What was wrong with the record.
        kind: TraceErrorKind,
    },

    /// The trace file could not be read.
    #[error("failed to read trace file {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The trace could not be loaded.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// An instruction names a register the rename table cannot hold.
    #[error("instruction {seq} uses register {reg}, but only {limit} architectural registers are configured")]
    RegisterOutOfRange {
        /// Sequence index of the offending instruction.
        seq: usize,
        /// Register id named by the instruction.
        reg: usize,
        /// Configured register count.
        limit: usize,
    },

    /// The pipeline did not drain within the cycle budget.
    #[error("simulation did not finish within {limit} cycles")]
    CycleLimitExceeded {
        /// Cycle budget that was exhausted.
        limit: u64,
    },
}
