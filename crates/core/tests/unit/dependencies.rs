//! Data-dependency behaviour: wakeup timing, renaming, and latency classes.

use oosim_core::config::Config;
use oosim_core::pipeline::{SrcOperand, SrcTag, Stage};
use rstest::rstest;

use crate::common::{TestContext, TraceBuilder};

/// Consumer issue lands exactly one cycle after the producer's execute finishes,
/// whatever the producer's latency class.
#[rstest]
#[case::base(0, 1)]
#[case::other_base(1, 1)]
#[case::multiply(2, 3)]
#[case::divide(3, 5)]
fn consumer_waits_for_producer_latency(#[case] opcode: u32, #[case] latency: u64) {
    let trace = TraceBuilder::new().op(opcode, 1, -1, -1).op(0, 2, 1, -1).build();
    let ctx = TestContext::new(8, 8, 2, trace).run();

    let producer = ctx.span(0, Stage::Execute);
    assert_eq!(producer.duration(), latency);
    assert_eq!(ctx.span(1, Stage::Issue).end, producer.end + 1);
}

#[rstest]
#[case::src1(SrcOperand::Src1)]
#[case::src2(SrcOperand::Src2)]
fn either_operand_creates_dependency(#[case] operand: SrcOperand) {
    let (s1, s2) = match operand {
        SrcOperand::Src1 => (4, -1),
        SrcOperand::Src2 => (-1, 4),
    };
    let trace = TraceBuilder::new().op(3, 4, -1, -1).op(0, 5, s1, s2).build();
    let ctx = TestContext::new(8, 8, 1, trace).run();

    assert_eq!(
        ctx.span(1, Stage::Issue).end,
        ctx.span(0, Stage::Execute).end + 1
    );
}

#[test]
fn both_sources_must_be_ready() {
    // I2 reads a fast producer (r1) and a slow one (r2).
    let trace = TraceBuilder::new()
        .op(0, 1, -1, -1)
        .op(3, 2, -1, -1)
        .op(0, 3, 1, 2)
        .build();
    let ctx = TestContext::new(8, 8, 3, trace).run();

    let slow = ctx.span(1, Stage::Execute).end;
    assert_eq!(ctx.span(2, Stage::Issue).end, slow + 1);
}

#[test]
fn source_equal_to_destination_reads_previous_writer() {
    // I1 computes r1 = f(r1); it must wait on I0, not on itself.
    let trace = TraceBuilder::new().op(2, 1, -1, -1).op(0, 1, 1, -1).build();
    let mut ctx = TestContext::new(8, 8, 2, trace);
    ctx.step(4);

    let inst = ctx.inst(1);
    assert_eq!(inst.src1_tag, SrcTag::Waiting(ctx.inst(0).rob_slot.unwrap()));

    let ctx = ctx.run();
    assert_eq!(
        ctx.span(1, Stage::Issue).end,
        ctx.span(0, Stage::Execute).end + 1
    );
}

#[test]
fn latest_writer_wins_after_rewrite() {
    // I0 and I1 both write r1; I2 must depend only on I1.
    let trace = TraceBuilder::new()
        .op(3, 1, -1, -1)
        .op(0, 1, -1, -1)
        .op(0, 2, 1, -1)
        .build();
    let ctx = TestContext::new(8, 8, 3, trace).run();

    let i1_done = ctx.span(1, Stage::Execute).end;
    let i0_done = ctx.span(0, Stage::Execute).end;
    assert!(i1_done < i0_done);
    assert_eq!(ctx.span(2, Stage::Issue).end, i1_done + 1);
}

#[test]
fn retired_producer_leaves_operand_ready() {
    // Enough unrelated work separates the pair that I0 retires before I5 renames.
    let trace = TraceBuilder::new()
        .op(0, 7, -1, -1)
        .independent(0, 4)
        .op(0, 8, 7, -1)
        .build();
    let mut ctx = TestContext::new(2, 2, 1, trace);
    while ctx.sim.pipeline().instruction(5).is_none_or(|i| i.rob_slot.is_none()) {
        ctx.step(1);
    }
    assert_eq!(ctx.inst(5).src1_tag, SrcTag::Ready);
    assert!(ctx.sim.pipeline().rmt_snapshot().mappings[7].is_none());
}

#[test]
fn retiring_older_writer_keeps_newer_mapping() {
    let trace = TraceBuilder::new()
        .op(0, 3, -1, -1)
        .op(3, 3, -1, -1)
        .build();
    let mut ctx = TestContext::new(8, 8, 1, trace);
    // I0 retires in cycle 9 while I1 is still executing.
    ctx.step(10);
    assert_eq!(ctx.span(0, Stage::Retire).end, 9);
    let i1_slot = ctx.inst(1).rob_slot.unwrap();
    assert_eq!(
        ctx.sim.pipeline().rmt_snapshot().mappings[3],
        Some(i1_slot)
    );

    let ctx = ctx.run();
    assert!(ctx.sim.pipeline().rmt_snapshot().mappings[3].is_none());
}

#[test]
fn custom_latency_table_applies() {
    let mut config = Config::new(8, 8, 1);
    config.latency.base = 2;
    assert_eq!(config.latency.overrides.insert(9, 7), None);
    let trace = TraceBuilder::new().op(0, 1, -1, -1).op(9, 2, -1, -1).build();
    let ctx = TestContext::with_config(&config, trace).run();

    assert_eq!(ctx.span(0, Stage::Execute).duration(), 2);
    assert_eq!(ctx.span(1, Stage::Execute).duration(), 7);
    assert_eq!(ctx.inst(1).latency, 7);
}
