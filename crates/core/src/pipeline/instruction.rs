//! In-flight instruction record and per-stage timing.
//!
//! An [`Instruction`] carries the immutable program-order facts read from the
//! trace (PC, opcode, architectural registers, sequence index) together with
//! the mutable state the pipeline attaches to it: the renamed source operands,
//! the owned ROB slot, the execution timer, and nine begin/end cycle stamps.

use serde::Serialize;

use crate::pipeline::rob::RobSlot;
use crate::sim::trace::TraceRecord;

/// Pipeline stages in program-flow order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    /// Pulled from the trace into the fetch latch.
    Fetch,
    /// Waiting in the decode latch.
    Decode,
    /// Waiting for ROB space in the rename latch.
    Rename,
    /// Waiting in the register-read latch.
    RegRead,
    /// Waiting for IQ space in the dispatch latch.
    Dispatch,
    /// Waiting in the issue queue for operands.
    Issue,
    /// Counting down its latency.
    Execute,
    /// Finished, waiting to broadcast its result.
    Writeback,
    /// Result broadcast, waiting to reach the ROB head.
    Retire,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 9;

    /// Every stage in pipeline order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Rename,
        Self::RegRead,
        Self::Dispatch,
        Self::Issue,
        Self::Execute,
        Self::Writeback,
        Self::Retire,
    ];

    /// Two-letter mnemonic used in timing reports.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Fetch => "FE",
            Self::Decode => "DE",
            Self::Rename => "RN",
            Self::RegRead => "RR",
            Self::Dispatch => "DI",
            Self::Issue => "IS",
            Self::Execute => "EX",
            Self::Writeback => "WB",
            Self::Retire => "RT",
        }
    }

    /// The stage an instruction enters after this one, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Fetch => Some(Self::Decode),
            Self::Decode => Some(Self::Rename),
            Self::Rename => Some(Self::RegRead),
            Self::RegRead => Some(Self::Dispatch),
            Self::Dispatch => Some(Self::Issue),
            Self::Issue => Some(Self::Execute),
            Self::Execute => Some(Self::Writeback),
            Self::Writeback => Some(Self::Retire),
            Self::Retire => None,
        }
    }
}

/// Cycle an instruction entered and left one stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageSpan {
    /// Cycle the instruction entered the stage.
    pub begin: u64,
    /// Cycle the instruction left the stage.
    pub end: u64,
}

impl StageSpan {
    /// Cycles spent in the stage.
    #[inline]
    pub const fn duration(&self) -> u64 {
        self.end.saturating_sub(self.begin)
    }
}

/// Begin/end cycle stamps for all nine stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageTimes {
    spans: [StageSpan; Stage::COUNT],
}

impl StageTimes {
    /// Returns the span recorded for `stage`.
    #[inline]
    pub const fn span(&self, stage: Stage) -> StageSpan {
        self.spans[stage as usize]
    }

    /// Iterates over `(stage, span)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, StageSpan)> + '_ {
        Stage::ALL.iter().map(|&s| (s, self.spans[s as usize]))
    }

    pub(crate) fn mark_begin(&mut self, stage: Stage, cycle: u64) {
        self.spans[stage as usize].begin = cycle;
    }

    pub(crate) fn mark_end(&mut self, stage: Stage, cycle: u64) {
        self.spans[stage as usize].end = cycle;
    }

    /// Stamps the end of `from` and the begin of the following stage.
    pub(crate) fn advance(&mut self, from: Stage, cycle: u64) {
        self.mark_end(from, cycle);
        if let Some(next) = from.next() {
            self.mark_begin(next, cycle);
        }
    }
}

/// Source operand selector for dependency edges and IQ readiness flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SrcOperand {
    /// First source register.
    Src1,
    /// Second source register.
    Src2,
}

/// Renamed source operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SrcTag {
    /// No in-flight producer; the value is already available.
    #[default]
    Ready,
    /// Waiting on the instruction that owns this ROB slot.
    Waiting(RobSlot),
}

impl SrcTag {
    /// Whether the operand still waits on a producer.
    #[inline]
    pub const fn is_waiting(self) -> bool {
        matches!(self, Self::Waiting(_))
    }
}

/// One instruction of the trace as it moves through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Program-order sequence index (0-based, unique, strictly increasing).
    pub seq: usize,
    /// Program counter.
    pub pc: u64,
    /// Opcode; selects the latency class.
    pub opcode: u32,
    /// Destination register, if any.
    pub dst: Option<usize>,
    /// First source register, if any.
    pub src1: Option<usize>,
    /// Second source register, if any.
    pub src2: Option<usize>,
    /// Execution latency in cycles.
    pub latency: u32,
    /// Cycles spent executing so far.
    pub exec_timer: u32,
    /// Renamed first source.
    pub src1_tag: SrcTag,
    /// Renamed second source.
    pub src2_tag: SrcTag,
    /// ROB slot owned from rename until retirement.
    pub rob_slot: Option<RobSlot>,
    /// Stage timestamps.
    pub timing: StageTimes,
}

impl Instruction {
    /// Creates an instruction from a trace record.
    pub fn new(seq: usize, record: &TraceRecord, latency: u32) -> Self {
        Self {
            seq,
            pc: record.pc,
            opcode: record.opcode,
            dst: record.dst,
            src1: record.src1,
            src2: record.src2,
            latency,
            exec_timer: 0,
            src1_tag: SrcTag::Ready,
            src2_tag: SrcTag::Ready,
            rob_slot: None,
            timing: StageTimes::default(),
        }
    }

    /// Architectural register read by `operand`.
    #[inline]
    pub const fn src(&self, operand: SrcOperand) -> Option<usize> {
        match operand {
            SrcOperand::Src1 => self.src1,
            SrcOperand::Src2 => self.src2,
        }
    }

    /// Renamed tag of `operand`.
    #[inline]
    pub const fn src_tag(&self, operand: SrcOperand) -> SrcTag {
        match operand {
            SrcOperand::Src1 => self.src1_tag,
            SrcOperand::Src2 => self.src2_tag,
        }
    }

    pub(crate) fn set_src_tag(&mut self, operand: SrcOperand, tag: SrcTag) {
        match operand {
            SrcOperand::Src1 => self.src1_tag = tag,
            SrcOperand::Src2 => self.src2_tag = tag,
        }
    }

    /// Architectural registers named by this instruction.
    pub fn registers(&self) -> impl Iterator<Item = usize> {
        [self.dst, self.src1, self.src2].into_iter().flatten()
    }
}
