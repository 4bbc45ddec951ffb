//! Hand-timed pipeline scenarios.
//!
//! Every cycle number below was worked out by stepping the stage order
//! (RT, WB, EX, IS, DI, RR, RN, DE, FE) by hand.

use oosim_core::pipeline::Stage;
use pretty_assertions::assert_eq;

use crate::common::{TestContext, TraceBuilder};

#[test]
fn independent_stream_single_width() {
    let trace = TraceBuilder::new().independent(0, 3).build();
    let ctx = TestContext::new(4, 4, 1, trace).run();

    let expected = [
        (Stage::Fetch, (0, 1)),
        (Stage::Decode, (1, 2)),
        (Stage::Rename, (2, 3)),
        (Stage::RegRead, (3, 4)),
        (Stage::Dispatch, (4, 5)),
        (Stage::Issue, (5, 6)),
        (Stage::Execute, (6, 7)),
        (Stage::Writeback, (7, 8)),
        (Stage::Retire, (8, 9)),
    ];
    for (stage, span) in expected {
        assert_eq!(ctx.at(0, stage), span, "instruction 0 stage {stage:?}");
    }

    assert_eq!(ctx.at(1, Stage::Retire), (9, 10));
    assert_eq!(ctx.at(2, Stage::Retire), (10, 11));

    let stats = ctx.stats();
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.final_cycle, 12);
    assert_eq!(stats.cycles(), 11);
    assert!((stats.ipc() - 3.0 / 11.0).abs() < 1e-12);
    assert_eq!(stats.stalls_rob, 0);
    assert_eq!(stats.stalls_iq, 0);
}

#[test]
fn dependent_pair_issues_after_producer_finishes() {
    // I0: multiply class (3 cycles) writes r1; I1 reads r1 in the same bundle.
    let trace = TraceBuilder::new().op(2, 1, -1, -1).op(0, 2, 1, -1).build();
    let ctx = TestContext::new(8, 8, 2, trace).run();

    assert_eq!(ctx.at(0, Stage::Issue), (5, 6));
    assert_eq!(ctx.at(0, Stage::Execute), (6, 9));
    assert_eq!(ctx.at(0, Stage::Writeback), (9, 10));
    assert_eq!(ctx.at(0, Stage::Retire), (10, 11));

    // Same-cycle forwarding is not modelled: issue waits one cycle past the producer.
    assert_eq!(ctx.at(1, Stage::Issue), (5, 10));
    assert_eq!(ctx.at(1, Stage::Execute), (10, 11));
    assert_eq!(ctx.at(1, Stage::Writeback), (11, 12));
    assert_eq!(ctx.at(1, Stage::Retire), (12, 13));

    assert_eq!(ctx.stats().final_cycle, 14);
    assert_eq!(ctx.stats().cycles(), 13);
}

#[test]
fn rename_holds_bundle_until_rob_drains() {
    let trace = TraceBuilder::new().independent(3, 4).build();
    let ctx = TestContext::new(2, 2, 2, trace).run();

    for seq in 0..2 {
        assert_eq!(ctx.at(seq, Stage::Rename), (2, 3));
        assert_eq!(ctx.at(seq, Stage::Execute), (6, 11));
        assert_eq!(ctx.at(seq, Stage::Retire), (12, 13));
    }
    for seq in 2..4 {
        // The second bundle sits in rename until the first retires.
        assert_eq!(ctx.at(seq, Stage::Rename), (3, 13));
        assert_eq!(ctx.span(seq, Stage::Rename).end, ctx.span(0, Stage::Retire).end);
        assert_eq!(ctx.at(seq, Stage::RegRead), (13, 14));
    }

    assert_eq!(ctx.stats().stalls_rob, 9);
    assert_eq!(ctx.stats().stalls_iq, 0);
    assert_eq!(ctx.stats().instructions_retired, 4);
}

#[test]
fn dispatch_holds_bundle_until_iq_drains() {
    // IQ of one entry: I1 waits in the queue on I0 (5 cycles), blocking I2.
    let trace = TraceBuilder::new()
        .op(3, 1, -1, -1)
        .op(0, 2, 1, -1)
        .op(0, 3, -1, -1)
        .build();
    let ctx = TestContext::new(8, 1, 1, trace).run();

    assert_eq!(ctx.at(0, Stage::Issue), (5, 6));
    assert_eq!(ctx.at(0, Stage::Execute), (6, 11));
    assert_eq!(ctx.at(0, Stage::Retire), (12, 13));

    assert_eq!(ctx.at(1, Stage::Dispatch), (5, 6));
    assert_eq!(ctx.at(1, Stage::Issue), (6, 12));

    assert_eq!(ctx.at(2, Stage::Dispatch), (6, 12));
    assert_eq!(ctx.at(2, Stage::Issue), (12, 13));
    assert_eq!(ctx.at(2, Stage::Retire), (15, 16));

    assert_eq!(ctx.stats().stalls_iq, 5);
    assert_eq!(ctx.stats().stalls_rob, 0);
    assert_eq!(ctx.stats().final_cycle, 17);
}

#[test]
fn younger_ready_instruction_bypasses_stalled_one() {
    // I1 waits on the divide in I0; independent I2 issues first.
    let trace = TraceBuilder::new()
        .op(3, 1, -1, -1)
        .op(0, 2, 1, -1)
        .op(0, 3, -1, -1)
        .build();
    let ctx = TestContext::new(8, 8, 1, trace).run();

    assert!(ctx.span(2, Stage::Issue).end < ctx.span(1, Stage::Issue).end);
    // Retirement is still in program order.
    assert!(ctx.span(1, Stage::Retire).end <= ctx.span(2, Stage::Retire).end);
}
