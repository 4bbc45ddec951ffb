//! Trace input and simulation control.
//!
//! Provides the trace file reader and the [`Simulator`] that runs a pipeline
//! until every traced instruction has retired.

/// Top-level simulator driver.
pub mod simulator;

/// Trace records and the trace file reader.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{TraceRecord, load_trace, parse_trace};
