//! Execute (EX) Stage.
//!
//! Every executing instruction advances its timer by one cycle. Instructions
//! whose timer reaches their latency leave the execution list for the writeback
//! set; their results are broadcast by the writeback stage on the next cycle.

use tracing::trace;

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::Stage;

/// Executes the execute stage.
pub fn execute_stage(p: &mut Pipeline) {
    let cycle = p.cycle;
    let insts = &mut p.insts;
    let writeback = &mut p.writeback;

    p.exec_list.retain(|&seq| {
        let inst = &mut insts[seq];
        inst.exec_timer += 1;
        if inst.exec_timer < inst.latency {
            return true;
        }
        inst.timing.advance(Stage::Execute, cycle);
        trace!(cycle, seq, "EX done");
        writeback.push(seq);
        false
    });
}
