//! Read-only snapshots of pipeline state.
//!
//! Visualizers and reporters receive owned copies of the engine structures, so
//! nothing they hold can reach back into the live ROB, IQ, or rename table.

use serde::Serialize;

use crate::pipeline::issue_queue::IqEntry;
use crate::pipeline::rob::{RobSlot, Wakeup};

/// Copy of one live ROB entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RobEntrySnapshot {
    /// Slot index.
    pub slot: RobSlot,
    /// Owning instruction.
    pub seq: usize,
    /// Program counter of the owner.
    pub pc: u64,
    /// Destination register.
    pub dst: Option<usize>,
    /// Result broadcast.
    pub ready: bool,
    /// Consumers still waiting on this entry.
    pub waiters: Vec<Wakeup>,
}

/// Copy of the ROB.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RobSnapshot {
    /// Total slots.
    pub capacity: usize,
    /// Oldest slot.
    pub head: RobSlot,
    /// Next slot to allocate.
    pub tail: RobSlot,
    /// Full flag.
    pub full: bool,
    /// Empty flag.
    pub empty: bool,
    /// Free slots.
    pub free: usize,
    /// Live entries, head to tail.
    pub entries: Vec<RobEntrySnapshot>,
}

/// Copy of the issue queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IqSnapshot {
    /// Total entries.
    pub capacity: usize,
    /// Free entries.
    pub free: usize,
    /// Queued entries, oldest first.
    pub entries: Vec<IqEntry>,
}

/// Copy of the rename table; index is the architectural register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RmtSnapshot {
    /// Producer slot per register.
    pub mappings: Vec<Option<RobSlot>>,
}

/// Copy of every pipeline structure at the start of a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineSnapshot {
    /// Next cycle to simulate.
    pub cycle: u64,
    /// Fetch latch.
    pub fetch: Vec<usize>,
    /// Decode latch.
    pub decode: Vec<usize>,
    /// Rename latch.
    pub rename: Vec<usize>,
    /// Register-read latch.
    pub reg_read: Vec<usize>,
    /// Dispatch latch.
    pub dispatch: Vec<usize>,
    /// Execution list.
    pub executing: Vec<usize>,
    /// Writeback set.
    pub writeback: Vec<usize>,
    /// Reorder buffer.
    pub rob: RobSnapshot,
    /// Issue queue.
    pub iq: IqSnapshot,
    /// Rename table.
    pub rmt: RmtSnapshot,
}
