//! Out-of-order instruction pipeline.
//!
//! This module contains the nine-stage superscalar pipeline model. It includes:
//! 1. **Engine:** The [`Pipeline`] state machine and its per-cycle driver.
//! 2. **Instruction:** In-flight instruction records and per-stage timestamps.
//! 3. **Structures:** Reorder buffer, rename map table, issue queue, and front-end latches.
//! 4. **Stages:** Fetch through Retire, one function per stage.
//! 5. **Snapshots:** Owned, serializable copies of the structures for reporting.

/// Pipeline state machine.
pub mod engine;

/// In-flight instruction record and stage timing.
pub mod instruction;

/// Oldest-first issue queue.
pub mod issue_queue;

/// Single-bundle front-end latches.
pub mod latches;

/// Register rename map table.
pub mod rmt;

/// Reorder buffer.
pub mod rob;

/// Read-only snapshots of pipeline structures.
pub mod snapshot;

/// Pipeline stage implementations.
pub mod stages;

pub use engine::Pipeline;
pub use instruction::{Instruction, SrcOperand, SrcTag, Stage, StageSpan, StageTimes};
pub use issue_queue::{IqEntry, IssueQueue};
pub use latches::{Bundle, Latch};
pub use rmt::RenameMapTable;
pub use rob::{Rob, RobEntry, RobSlot, Wakeup};
pub use snapshot::{IqSnapshot, PipelineSnapshot, RmtSnapshot, RobEntrySnapshot, RobSnapshot};
