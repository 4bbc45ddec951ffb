//! Pipeline stage implementations.
//!
//! Each stage is a free function over the [`Pipeline`](crate::pipeline::Pipeline)
//! state, called once per cycle by [`Pipeline::tick`](crate::pipeline::Pipeline::tick)
//! in reverse pipeline order. It includes:
//! 1. **Front end:** Fetch, Decode, Rename, and RegRead move whole bundles between latches.
//! 2. **Dispatch:** Moves the dispatch bundle into the issue queue when it has room.
//! 3. **Back end:** Issue, Execute, and Writeback operate on individual instructions.
//! 4. **Retire:** Releases completed instructions from the ROB head in program order.

/// Instruction decode stage implementation.
pub mod decode;

/// Dispatch into the issue queue.
pub mod dispatch;

/// Execution latency countdown.
pub mod execute;

/// Trace fetch stage implementation.
pub mod fetch;

/// Oldest-first issue selection.
pub mod issue;

/// Register read stage implementation.
pub mod reg_read;

/// Register renaming and ROB allocation.
pub mod rename;

/// In-order retirement from the ROB head.
pub mod retire;

/// Result broadcast and consumer wakeup.
pub mod writeback;

/// Decode stage entry point (DE stage).
pub use decode::decode_stage;
/// Dispatch stage entry point (DI stage).
pub use dispatch::dispatch_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (FE stage).
pub use fetch::fetch_stage;
/// Issue stage entry point (IS stage).
pub use issue::issue_stage;
/// Register read stage entry point (RR stage).
pub use reg_read::reg_read_stage;
/// Rename stage entry point (RN stage).
pub use rename::rename_stage;
/// Retire stage entry point (RT stage).
pub use retire::retire_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::writeback_stage;
