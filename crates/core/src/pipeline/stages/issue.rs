//! Issue (IS) Stage.
//!
//! Selects up to `width` ready entries from the issue queue, oldest first, and
//! starts their execution. Younger ready instructions may pass older ones that
//! still wait on operands.

use tracing::trace;

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::Stage;

/// Executes the issue stage.
pub fn issue_stage(p: &mut Pipeline) {
    for seq in p.iq.issue() {
        let inst = &mut p.insts[seq];
        inst.exec_timer = 0;
        inst.timing.advance(Stage::Issue, p.cycle);
        trace!(cycle = p.cycle, seq, latency = inst.latency, "IS");
        p.exec_list.push(seq);
    }
}
