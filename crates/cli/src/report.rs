//! Text and JSON rendering of simulation results.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use oosim_core::config::PipelineConfig;
use oosim_core::pipeline::{Instruction, Stage};
use oosim_core::stats::SimStats;

/// Register id printed for an absent operand.
const NO_REG: i64 = -1;

fn reg(r: Option<usize>) -> i64 {
    r.map_or(NO_REG, |r| r as i64)
}

/// One timing line: `<seq> fu{op} src{s1,s2} dst{d} FE{begin,cycles} ... RT{begin,cycles}`.
pub fn timing_line(inst: &Instruction) -> String {
    let mut line = format!(
        "{} fu{{{}}} src{{{},{}}} dst{{{}}}",
        inst.seq,
        inst.opcode,
        reg(inst.src1),
        reg(inst.src2),
        reg(inst.dst)
    );
    for stage in Stage::ALL {
        let span = inst.timing.span(stage);
        let _ = write!(
            line,
            " {}{{{},{}}}",
            stage.mnemonic(),
            span.begin,
            span.duration()
        );
    }
    line
}

/// The summary block printed after a run.
pub fn summary(pipeline: &PipelineConfig, trace: &Path, stats: &SimStats) -> String {
    format!(
        "# === Simulator Command =========\n\
         # ./sim {rob} {iq} {width} {trace}\n\
         # === Processor Configuration ===\n\
         # ROB_SIZE = {rob}\n\
         # IQ_SIZE  = {iq}\n\
         # WIDTH    = {width}\n\
         # === Simulation Results ========\n\
         # Dynamic Instruction Count    = {count}\n\
         # Cycles                       = {cycles}\n\
         # Instructions Per Cycle (IPC) = {ipc:.2}\n",
        rob = pipeline.rob_size,
        iq = pipeline.iq_size,
        width = pipeline.width,
        trace = trace.display(),
        count = stats.instructions_retired,
        cycles = stats.cycles(),
        ipc = stats.ipc(),
    )
}

/// JSON report body.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Structure sizes the run used.
    pub pipeline: &'a PipelineConfig,
    /// Raw counters.
    pub stats: &'a SimStats,
    /// Reported cycle count.
    pub cycles: u64,
    /// Instructions per cycle.
    pub ipc: f64,
}

impl<'a> JsonReport<'a> {
    /// Builds the report for a finished run.
    pub fn new(pipeline: &'a PipelineConfig, stats: &'a SimStats) -> Self {
        Self {
            pipeline,
            stats,
            cycles: stats.cycles(),
            ipc: stats.ipc(),
        }
    }
}
