use oosim_core::config::Config;
use oosim_core::pipeline::{Instruction, Stage, StageSpan};
use oosim_core::{SimStats, Simulator, TraceRecord};
use tracing_subscriber::EnvFilter;

/// Upper bound on cycles for any test run; far above what the suites need.
pub const CYCLE_LIMIT: u64 = 100_000;

/// Installs a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    pub fn new(rob_size: usize, iq_size: usize, width: usize, trace: Vec<TraceRecord>) -> Self {
        Self::with_config(&Config::new(rob_size, iq_size, width), trace)
    }

    pub fn with_config(config: &Config, trace: Vec<TraceRecord>) -> Self {
        init_tracing();
        let sim = Simulator::new(config, trace).unwrap();
        Self { sim }
    }

    /// Runs to completion, failing the test if the pipeline does not drain.
    pub fn run(mut self) -> Self {
        let _ = self.sim.run_for(CYCLE_LIMIT).unwrap();
        self
    }

    /// Advances `n` cycles.
    pub fn step(&mut self, n: usize) {
        for _ in 0..n {
            self.sim.tick();
        }
    }

    pub fn stats(&self) -> &SimStats {
        self.sim.stats()
    }

    pub fn inst(&self, seq: usize) -> &Instruction {
        self.sim.pipeline().instruction(seq).unwrap()
    }

    pub fn span(&self, seq: usize, stage: Stage) -> StageSpan {
        self.inst(seq).timing.span(stage)
    }

    /// `(begin, end)` of `stage` for instruction `seq`.
    pub fn at(&self, seq: usize, stage: Stage) -> (u64, u64) {
        let s = self.span(seq, stage);
        (s.begin, s.end)
    }
}
