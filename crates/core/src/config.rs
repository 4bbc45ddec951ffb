//! Configuration system for the out-of-order pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline structure sizes, width, and latency classes.
//! 2. **Structures:** Pipeline sizing, the opcode latency table, and the architectural register file.
//! 3. **Validation:** Rejection of parameters that could never make forward progress.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built directly
//! with [`Config::new`] from the three classic parameters: ROB size, IQ size, width.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Reorder buffer entries.
    pub const ROB_SIZE: usize = 64;

    /// Issue queue entries.
    pub const IQ_SIZE: usize = 32;

    /// Instructions moved per stage per cycle.
    pub const WIDTH: usize = 4;

    /// Latency of any opcode without an explicit override.
    pub const BASE_LATENCY: u32 = 1;

    /// Multiply-class opcode.
    pub const MUL_OPCODE: u32 = 2;

    /// Multiply-class latency.
    pub const MUL_LATENCY: u32 = 3;

    /// Divide-class opcode.
    pub const DIV_OPCODE: u32 = 3;

    /// Divide-class latency.
    pub const DIV_LATENCY: u32 = 5;

    /// Architectural registers tracked by the rename table.
    pub const NUM_ARCH_REGS: usize = 67;
}

/// Root simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Config {
    /// Structure sizes and width.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Opcode to execution latency table.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Architectural state dimensions.
    #[serde(default)]
    pub arch: ArchConfig,
}

impl Config {
    /// Builds a configuration with the given ROB size, IQ size, and width, and
    /// default latencies and register count.
    pub fn new(rob_size: usize, iq_size: usize, width: usize) -> Self {
        Self {
            pipeline: PipelineConfig {
                rob_size,
                iq_size,
                width,
            },
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a valid configuration document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks that every parameter allows the pipeline to make progress.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        self.latency.validate()?;
        if self.arch.num_regs == 0 {
            return Err(ConfigError::ZeroRegisters);
        }
        Ok(())
    }
}

/// Pipeline structure sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Reorder buffer capacity.
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Issue queue capacity.
    #[serde(default = "PipelineConfig::default_iq_size")]
    pub iq_size: usize,

    /// Superscalar width (instructions per stage per cycle).
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,
}

impl PipelineConfig {
    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    fn default_iq_size() -> usize {
        defaults::IQ_SIZE
    }

    fn default_width() -> usize {
        defaults::WIDTH
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rob_size == 0 {
            return Err(ConfigError::ZeroRobSize);
        }
        if self.iq_size == 0 {
            return Err(ConfigError::ZeroIqSize);
        }
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.rob_size < self.width {
            return Err(ConfigError::RobSmallerThanWidth {
                rob_size: self.rob_size,
                width: self.width,
            });
        }
        if self.iq_size < self.width {
            return Err(ConfigError::IqSmallerThanWidth {
                iq_size: self.iq_size,
                width: self.width,
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            iq_size: defaults::IQ_SIZE,
            width: defaults::WIDTH,
        }
    }
}

/// Opcode-derived execution latency classes.
///
/// Opcodes without an entry in `overrides` execute in `base` cycles. In JSON,
/// override keys are opcode numbers written as strings, e.g. `{"2": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencyConfig {
    /// Latency of opcodes with no override.
    #[serde(default = "LatencyConfig::default_base")]
    pub base: u32,

    /// Per-opcode latency overrides.
    #[serde(default = "LatencyConfig::default_overrides")]
    pub overrides: BTreeMap<u32, u32>,
}

impl LatencyConfig {
    fn default_base() -> u32 {
        defaults::BASE_LATENCY
    }

    fn default_overrides() -> BTreeMap<u32, u32> {
        BTreeMap::from([
            (defaults::MUL_OPCODE, defaults::MUL_LATENCY),
            (defaults::DIV_OPCODE, defaults::DIV_LATENCY),
        ])
    }

    /// Returns the execution latency of `opcode` in cycles.
    #[inline]
    pub fn latency_for(&self, opcode: u32) -> u32 {
        self.overrides.get(&opcode).copied().unwrap_or(self.base)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base == 0 {
            return Err(ConfigError::ZeroLatency {
                class: "base".to_string(),
            });
        }
        if let Some((opcode, _)) = self.overrides.iter().find(|(_, lat)| **lat == 0) {
            return Err(ConfigError::ZeroLatency {
                class: format!("opcode {opcode}"),
            });
        }
        Ok(())
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            base: Self::default_base(),
            overrides: Self::default_overrides(),
        }
    }
}

/// Architectural state dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArchConfig {
    /// Number of architectural registers (register ids `0..num_regs`).
    #[serde(default = "ArchConfig::default_num_regs")]
    pub num_regs: usize,
}

impl ArchConfig {
    fn default_num_regs() -> usize {
        defaults::NUM_ARCH_REGS
    }
}

impl Default for ArchConfig {
    fn default() -> Self {
        Self {
            num_regs: defaults::NUM_ARCH_REGS,
        }
    }
}
