//! Simulation statistics collection.
//!
//! This module tracks aggregate metrics for a pipeline run. It provides:
//! 1. **Cycle and IPC:** Final cycle number, reported cycle count, and instructions per cycle.
//! 2. **Throughput:** Instructions fetched from the trace and retired from the ROB.
//! 3. **Stalls:** Cycles in which rename or dispatch held a bundle for lack of ROB or IQ space.

use serde::Serialize;

/// Simulation statistics structure tracking all run-level metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Value of the cycle counter after the last simulated cycle.
    ///
    /// Cycle numbering starts at 0 with the first fetch, so the reported
    /// cycle count is one less than this (see [`SimStats::cycles`]).
    pub final_cycle: u64,
    /// Number of instructions pulled from the trace.
    pub instructions_fetched: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,
    /// Cycles in which rename stalled on ROB space.
    pub stalls_rob: u64,
    /// Cycles in which dispatch stalled on IQ space.
    pub stalls_iq: u64,
}

impl SimStats {
    /// Reported cycle count: the final cycle number minus one.
    #[inline]
    pub const fn cycles(&self) -> u64 {
        self.final_cycle.saturating_sub(1)
    }

    /// Instructions per cycle, or 0 if no cycles were counted.
    pub fn ipc(&self) -> f64 {
        let cycles = self.cycles();
        if cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / cycles as f64
        }
    }
}
