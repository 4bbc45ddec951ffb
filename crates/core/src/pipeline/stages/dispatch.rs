//! Dispatch (DI) Stage.
//!
//! Moves the whole dispatch bundle into the issue queue, or nothing at all. The
//! bundle waits while the queue has fewer than `width` free entries; each such
//! cycle counts as an IQ stall.

use tracing::{debug, trace};

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::Stage;
use crate::pipeline::issue_queue::IqEntry;

/// Executes the dispatch stage.
pub fn dispatch_stage(p: &mut Pipeline) {
    if p.dispatch.is_empty() {
        return;
    }
    if p.iq.free_size() < p.width {
        p.stats.stalls_iq += 1;
        debug!(cycle = p.cycle, free = p.iq.free_size(), "DI stall: IQ full");
        return;
    }
    let Some(bundle) = p.dispatch.take() else {
        return;
    };

    let entries: Vec<IqEntry> = bundle
        .iter()
        .map(|&seq| IqEntry::new(&p.insts[seq]))
        .collect();
    p.iq.insert_bundle(entries);
    p.advance_all(&bundle, Stage::Dispatch);
    trace!(cycle = p.cycle, bundle = ?bundle, "DI");
}
