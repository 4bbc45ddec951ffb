//! Trace Fetch (FE) Stage.
//!
//! Fetch does two things each cycle, in this order:
//! 1. **Advance:** Moves the fetch bundle into the decode latch if decode is empty.
//! 2. **Fetch:** Pulls up to `width` records from the trace into the empty fetch latch.
//!
//! Sequence numbers are assigned here, so they follow trace order exactly.

use tracing::trace;

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::{Instruction, Stage};

/// Executes the fetch stage.
///
/// Fetching stops early only when the trace runs out; a partial final bundle
/// moves through the pipeline like any other.
pub fn fetch_stage(p: &mut Pipeline) {
    if p.decode.is_empty()
        && let Some(bundle) = p.fetch.take()
    {
        p.advance_all(&bundle, Stage::Fetch);
        p.decode.push(bundle);
    }

    if !p.fetch.is_empty() || p.trace.is_empty() {
        return;
    }

    let count = p.width.min(p.trace.len());
    let mut bundle = Vec::with_capacity(count);
    for record in p.trace.drain(..count) {
        let seq = p.insts.len();
        let latency = p.config.latency.latency_for(record.opcode);
        let mut inst = Instruction::new(seq, &record, latency);
        inst.timing.mark_begin(Stage::Fetch, p.cycle);
        trace!(cycle = p.cycle, seq, pc = record.pc, "FE");
        p.insts.push(inst);
        bundle.push(seq);
    }

    p.stats.instructions_fetched += count as u64;
    p.fetch.push(bundle);
}
