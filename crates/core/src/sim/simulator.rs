//! Simulator: drives a [`Pipeline`] to completion.

use std::path::Path;

use tracing::info;

use crate::common::error::SimError;
use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::sim::trace::{TraceRecord, load_trace};
use crate::stats::SimStats;

/// Top-level simulator: a pipeline plus run control.
#[derive(Debug)]
pub struct Simulator {
    pipeline: Pipeline,
}

impl Simulator {
    /// Creates a simulator that replays `trace` under `config`.
    ///
    /// # Errors
    ///
    /// Propagates configuration and register-range errors from [`Pipeline::new`].
    pub fn new(
        config: &Config,
        trace: impl IntoIterator<Item = TraceRecord>,
    ) -> Result<Self, SimError> {
        Ok(Self {
            pipeline: Pipeline::new(config, trace)?,
        })
    }

    /// Creates a simulator from a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] if the file cannot be read or parsed, or any
    /// error from [`Simulator::new`].
    pub fn from_trace_file(config: &Config, path: impl AsRef<Path>) -> Result<Self, SimError> {
        let records = load_trace(path)?;
        Self::new(config, records)
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.pipeline.tick();
    }

    /// Whether every instruction has retired.
    pub fn is_done(&self) -> bool {
        self.pipeline.is_done()
    }

    /// Runs until the pipeline drains. At least one cycle is always simulated.
    ///
    /// A configuration that can never drain loops forever; use
    /// [`Simulator::run_for`] to bound the run.
    pub fn run(&mut self) -> &SimStats {
        loop {
            self.tick();
            if self.is_done() {
                break;
            }
        }
        self.report();
        self.pipeline.stats()
    }

    /// Runs until the pipeline drains or `max_cycles` cycles have been simulated.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimitExceeded`] if the pipeline is still busy
    /// after `max_cycles` cycles.
    pub fn run_for(&mut self, max_cycles: u64) -> Result<&SimStats, SimError> {
        loop {
            if self.pipeline.cycle() >= max_cycles {
                return Err(SimError::CycleLimitExceeded { limit: max_cycles });
            }
            self.tick();
            if self.is_done() {
                break;
            }
        }
        self.report();
        Ok(self.pipeline.stats())
    }

    fn report(&self) {
        let stats = self.pipeline.stats();
        info!(
            retired = stats.instructions_retired,
            cycles = stats.cycles(),
            ipc = stats.ipc(),
            stalls_rob = stats.stalls_rob,
            stalls_iq = stats.stalls_iq,
            "simulation complete"
        );
    }

    /// The underlying pipeline.
    #[inline]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Statistics so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        self.pipeline.stats()
    }
}
