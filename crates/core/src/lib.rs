//! Out-of-order superscalar pipeline simulator library.
//!
//! This crate implements a trace-driven, cycle-level model of a dynamically
//! scheduled processor core with the following:
//! 1. **Pipeline:** Nine stages (FE, DE, RN, RR, DI, IS, EX, WB, RT) advanced one cycle per tick.
//! 2. **Structures:** Circular reorder buffer, rename map table, and oldest-first issue queue.
//! 3. **Dependencies:** Producer wakeup lists on ROB slots, broadcast at writeback.
//! 4. **Simulation:** Trace loading, configuration, run control, and statistics.

/// Common types (error definitions).
pub mod common;
/// Simulator configuration (defaults, pipeline sizes, latency table).
pub mod config;
/// Out-of-order pipeline (engine, structures, stages, snapshots).
pub mod pipeline;
/// Trace loading and the top-level simulator driver.
pub mod sim;
/// Simulation statistics collection.
pub mod stats;

/// Root configuration type; use `Config::new` or deserialize from JSON.
pub use crate::config::Config;
/// Pipeline state machine; advance with `Pipeline::tick`.
pub use crate::pipeline::Pipeline;
/// Parsed trace record.
pub use crate::sim::trace::TraceRecord;
/// Run driver; construct with `Simulator::new` or `Simulator::from_trace_file`.
pub use crate::sim::Simulator;
/// Run-level statistics.
pub use crate::stats::SimStats;
