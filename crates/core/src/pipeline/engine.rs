//! Pipeline state machine and per-cycle driver.
//!
//! [`Pipeline`] owns every structure an instruction can occupy: the five
//! front-end latches, the ROB, the rename table, the issue queue, the execution
//! list, and the writeback set. Each call to [`Pipeline::tick`] simulates one
//! cycle by running the stages in reverse pipeline order:
//!
//! Retire → Writeback → Execute → Issue → Dispatch → RegRead → Rename → Decode → Fetch
//!
//! Running back to front means that space freed by a later stage this cycle
//! (a retired ROB slot, an issued IQ entry, a drained latch) is visible to the
//! earlier stage that wants it in the same cycle, while a result broadcast in
//! Writeback reaches Issue no sooner than the cycle after the producer finished.

use std::collections::VecDeque;

use crate::common::error::SimError;
use crate::config::Config;
use crate::pipeline::instruction::{Instruction, Stage};
use crate::pipeline::issue_queue::IssueQueue;
use crate::pipeline::latches::Latch;
use crate::pipeline::rmt::RenameMapTable;
use crate::pipeline::rob::Rob;
use crate::pipeline::snapshot::{
    IqSnapshot, PipelineSnapshot, RmtSnapshot, RobEntrySnapshot, RobSnapshot,
};
use crate::pipeline::stages;
use crate::sim::trace::TraceRecord;
use crate::stats::SimStats;

/// Out-of-order pipeline: all microarchitectural state plus the cycle counter.
#[derive(Debug)]
pub struct Pipeline {
    pub(crate) config: Config,
    pub(crate) width: usize,
    /// Current cycle number (the cycle being simulated by the next `tick`).
    pub(crate) cycle: u64,

    /// Records not yet fetched.
    pub(crate) trace: VecDeque<TraceRecord>,
    /// Every fetched instruction, indexed by sequence number.
    pub(crate) insts: Vec<Instruction>,

    pub(crate) fetch: Latch,
    pub(crate) decode: Latch,
    pub(crate) rename: Latch,
    pub(crate) reg_read: Latch,
    pub(crate) dispatch: Latch,

    pub(crate) rob: Rob,
    pub(crate) rmt: RenameMapTable,
    pub(crate) iq: IssueQueue,

    /// Instructions counting down their latency.
    pub(crate) exec_list: Vec<usize>,
    /// Instructions that finished executing and broadcast next cycle.
    pub(crate) writeback: Vec<usize>,

    pub(crate) stats: SimStats,
}

impl Pipeline {
    /// Builds a pipeline that will replay `trace` under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the configuration is invalid, or
    /// [`SimError::RegisterOutOfRange`] if a record names a register outside the
    /// configured architectural register file.
    pub fn new(
        config: &Config,
        trace: impl IntoIterator<Item = TraceRecord>,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let trace: VecDeque<TraceRecord> = trace.into_iter().collect();

        let limit = config.arch.num_regs;
        for (seq, rec) in trace.iter().enumerate() {
            if let Some(reg) = [rec.dst, rec.src1, rec.src2]
                .into_iter()
                .flatten()
                .find(|&r| r >= limit)
            {
                return Err(SimError::RegisterOutOfRange { seq, reg, limit });
            }
        }

        let p = &config.pipeline;
        Ok(Self {
            config: config.clone(),
            width: p.width,
            cycle: 0,
            insts: Vec::with_capacity(trace.len()),
            trace,
            fetch: Latch::new(),
            decode: Latch::new(),
            rename: Latch::new(),
            reg_read: Latch::new(),
            dispatch: Latch::new(),
            rob: Rob::new(p.rob_size),
            rmt: RenameMapTable::new(config.arch.num_regs),
            iq: IssueQueue::new(p.iq_size, p.width),
            exec_list: Vec::with_capacity(p.iq_size),
            writeback: Vec::with_capacity(p.width),
            stats: SimStats::default(),
        })
    }

    /// Run one cycle of the entire pipeline.
    pub fn tick(&mut self) {
        stages::retire_stage(self);
        stages::writeback_stage(self);
        stages::execute_stage(self);
        stages::issue_stage(self);
        stages::dispatch_stage(self);
        stages::reg_read_stage(self);
        stages::rename_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self);

        self.cycle += 1;
        self.stats.final_cycle = self.cycle;
    }

    /// Whether the trace is exhausted and no instruction remains in flight.
    pub fn is_done(&self) -> bool {
        self.trace.is_empty()
            && self.fetch.is_empty()
            && self.decode.is_empty()
            && self.rename.is_empty()
            && self.reg_read.is_empty()
            && self.dispatch.is_empty()
            && self.rob.is_empty()
            && self.exec_list.is_empty()
            && self.writeback.is_empty()
    }

    /// Number of the next cycle to simulate.
    #[inline]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Configuration the pipeline was built with.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Statistics so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Every fetched instruction in program order.
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.insts
    }

    /// The instruction with sequence index `seq`, if it has been fetched.
    #[inline]
    pub fn instruction(&self, seq: usize) -> Option<&Instruction> {
        self.insts.get(seq)
    }

    /// Owned copy of the ROB contents, head to tail.
    pub fn rob_snapshot(&self) -> RobSnapshot {
        RobSnapshot {
            capacity: self.rob.capacity(),
            head: self.rob.head(),
            tail: self.rob.tail(),
            full: self.rob.is_full(),
            empty: self.rob.is_empty(),
            free: self.rob.empty_size(),
            entries: self
                .rob
                .iter()
                .map(|(slot, e)| RobEntrySnapshot {
                    slot,
                    seq: e.seq,
                    pc: e.pc,
                    dst: e.dst,
                    ready: e.ready,
                    waiters: e.waiters.clone(),
                })
                .collect(),
        }
    }

    /// Owned copy of the issue queue contents, oldest first.
    pub fn iq_snapshot(&self) -> IqSnapshot {
        IqSnapshot {
            capacity: self.iq.capacity(),
            free: self.iq.free_size(),
            entries: self.iq.iter().copied().collect(),
        }
    }

    /// Owned copy of the rename table.
    pub fn rmt_snapshot(&self) -> RmtSnapshot {
        RmtSnapshot {
            mappings: self.rmt.iter().map(|(_, slot)| slot).collect(),
        }
    }

    /// Owned copy of the whole pipeline state.
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            cycle: self.cycle,
            fetch: self.fetch.to_vec(),
            decode: self.decode.to_vec(),
            rename: self.rename.to_vec(),
            reg_read: self.reg_read.to_vec(),
            dispatch: self.dispatch.to_vec(),
            executing: self.exec_list.clone(),
            writeback: self.writeback.clone(),
            rob: self.rob_snapshot(),
            iq: self.iq_snapshot(),
            rmt: self.rmt_snapshot(),
        }
    }

    /// Contents of the latch feeding `stage`, for the five latched stages.
    pub fn latch(&self, stage: Stage) -> Option<Vec<usize>> {
        let latch = match stage {
            Stage::Fetch => &self.fetch,
            Stage::Decode => &self.decode,
            Stage::Rename => &self.rename,
            Stage::RegRead => &self.reg_read,
            Stage::Dispatch => &self.dispatch,
            _ => return None,
        };
        Some(latch.to_vec())
    }

    /// Stamps the stage transition `from → next` for every instruction in `bundle`.
    pub(crate) fn advance_all(&mut self, bundle: &[usize], from: Stage) {
        for &seq in bundle {
            self.insts[seq].timing.advance(from, self.cycle);
        }
    }
}
