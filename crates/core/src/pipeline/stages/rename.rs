//! Register Rename (RN) Stage.
//!
//! Renames a whole bundle at once, in program order within the bundle:
//! 1. **Capacity:** Waits until the ROB has at least `width` free slots.
//! 2. **Source Lookup:** Tags each source with its in-flight producer, if one is pending.
//! 3. **Wakeup Edges:** Registers the consumer on the producer's ROB slot.
//! 4. **Allocation:** Claims a ROB slot and binds the destination in the rename table.
//!
//! Sources are looked up before the destination is bound, so an instruction that
//! reads and writes the same register depends on the previous writer, never on
//! itself. A later instruction in the same bundle sees the earlier one's binding.

use tracing::{debug, trace};

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::{SrcOperand, SrcTag, Stage};
use crate::pipeline::rob::Wakeup;

/// Executes the rename stage.
///
/// # Panics
///
/// Panics if the ROB runs out of slots mid-bundle, which the capacity check rules out.
pub fn rename_stage(p: &mut Pipeline) {
    if p.rename.is_empty() || !p.reg_read.is_empty() {
        return;
    }
    if p.rob.empty_size() < p.width {
        p.stats.stalls_rob += 1;
        debug!(cycle = p.cycle, free = p.rob.empty_size(), "RN stall: ROB full");
        return;
    }
    let Some(bundle) = p.rename.take() else {
        return;
    };

    for &seq in &bundle {
        for operand in [SrcOperand::Src1, SrcOperand::Src2] {
            let producer = p.insts[seq].src(operand).and_then(|reg| p.rmt.lookup(reg));
            let tag = match producer {
                Some(slot) if !p.rob.is_ready(slot) => {
                    p.rob.add_waiter(
                        slot,
                        Wakeup {
                            consumer: seq,
                            operand,
                        },
                    );
                    SrcTag::Waiting(slot)
                }
                _ => SrcTag::Ready,
            };
            p.insts[seq].set_src_tag(operand, tag);
        }

        let inst = &p.insts[seq];
        let Some(slot) = p.rob.allocate(seq, inst.pc, inst.dst) else {
            unreachable!("ROB overflow renaming instruction {seq}");
        };
        if let Some(dst) = inst.dst {
            p.rmt.bind(dst, slot);
        }

        let inst = &mut p.insts[seq];
        inst.rob_slot = Some(slot);
        inst.timing.advance(Stage::Rename, p.cycle);
        trace!(
            cycle = p.cycle,
            seq,
            slot = slot.0,
            src1 = ?inst.src1_tag,
            src2 = ?inst.src2_tag,
            "RN"
        );
    }

    p.reg_read.push(bundle);
}
