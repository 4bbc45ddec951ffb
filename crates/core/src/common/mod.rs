//! Common types shared across the simulator.
//!
//! This module currently holds the error definitions used by configuration,
//! trace loading, and the simulation driver.

/// Error types for configuration, trace parsing, and simulation.
pub mod error;

pub use error::{ConfigError, SimError, TraceError, TraceErrorKind};
