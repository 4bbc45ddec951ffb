//! Writeback (WB) Stage: broadcast results and wake consumers.
//!
//! For every instruction that finished executing last cycle:
//! 1. Marks its ROB slot ready, making it eligible to retire.
//! 2. Drains the slot's wakeup list, resolving each consumer operand.
//! 3. Sets the matching ready flag on consumers already in the issue queue.
//!
//! Consumers still in the front-end latches pick up the resolved operand when
//! they are dispatched.

use tracing::trace;

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::{SrcTag, Stage};

/// Executes the writeback stage.
///
/// # Panics
///
/// Panics if a finished instruction owns no ROB slot.
pub fn writeback_stage(p: &mut Pipeline) {
    let finished = std::mem::take(&mut p.writeback);

    for seq in finished {
        let Some(slot) = p.insts[seq].rob_slot else {
            unreachable!("instruction {seq} reached writeback without a ROB slot");
        };

        for wakeup in p.rob.complete(slot) {
            p.insts[wakeup.consumer].set_src_tag(wakeup.operand, SrcTag::Ready);
            let queued = p.iq.wake(wakeup.consumer, wakeup.operand);
            trace!(
                cycle = p.cycle,
                producer = seq,
                consumer = wakeup.consumer,
                operand = ?wakeup.operand,
                queued,
                "WB wakeup"
            );
        }

        p.insts[seq].timing.advance(Stage::Writeback, p.cycle);
    }
}
