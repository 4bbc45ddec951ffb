//! Retire (RT) Stage: release instructions from the ROB head.
//!
//! Retires up to `width` instructions per cycle in program order. Retirement
//! stops at the first head entry whose result has not been broadcast. A retiring
//! producer clears its rename mapping only if no younger instruction has since
//! claimed the same destination register.

use tracing::trace;

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::Stage;

/// Executes the retire stage.
pub fn retire_stage(p: &mut Pipeline) {
    for _ in 0..p.width {
        if !p.rob.peek_head().is_some_and(|head| head.ready) {
            break;
        }
        let Some((slot, entry)) = p.rob.pop_head() else {
            break;
        };

        if let Some(dst) = entry.dst {
            p.rmt.clear_if_match(dst, slot);
        }

        let inst = &mut p.insts[entry.seq];
        inst.rob_slot = None;
        inst.timing.mark_end(Stage::Retire, p.cycle);
        p.stats.instructions_retired += 1;
        trace!(cycle = p.cycle, seq = entry.seq, slot = slot.0, "RT");
    }
}
