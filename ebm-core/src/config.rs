//! Model and sweep configuration
//!
//! [`RunConfig`] is the TOML document read by the command-line tool:
//!
//! ```toml
//! [model]
//! distribution = "uniform"
//! steps_per_direction = 10
//!
//! [model.heat]
//! transport_coefficient = 7.6
//!
//! [sweep]
//! min_multiplier = 4.0
//! max_multiplier = 8.0
//! ```
//!
//! Every table and field is optional and falls back to its default.

use crate::errors::{EBMError, EBMResult};
use crate::insolation::InsolationDistribution;
use crate::parameters::{HeatParameters, InsolationParameters};
use crate::solver::DEFAULT_MAX_ITERATIONS;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Steps taken in each direction by a round-trip sweep.
pub const DEFAULT_STEPS_PER_DIRECTION: usize = 10;

/// Physical and numerical settings shared by every sweep of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub distribution: InsolationDistribution,
    pub steps_per_direction: usize,
    /// Iteration budget for each solve
    pub max_iterations: usize,
    pub heat: HeatParameters,
    pub insolation: InsolationParameters,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            distribution: InsolationDistribution::default(),
            steps_per_direction: DEFAULT_STEPS_PER_DIRECTION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            heat: HeatParameters::default(),
            insolation: InsolationParameters::default(),
        }
    }
}

/// The solar-multiplier range and starting state of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub min_multiplier: FloatValue,
    pub max_multiplier: FloatValue,
    /// Temperature (°C) every band starts from
    pub initial_temperature: FloatValue,
    pub num_bands: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_multiplier: 4.0,
            max_multiplier: 8.0,
            initial_temperature: -60.0,
            num_bands: 9,
        }
    }
}

/// A complete run: model settings plus the sweep to perform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: ModelConfig,
    pub sweep: SweepConfig,
}

impl RunConfig {
    pub fn from_toml_str(contents: &str) -> EBMResult<Self> {
        toml::from_str(contents).map_err(|e| EBMError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> EBMResult<String> {
        toml::to_string(self).map_err(|e| EBMError::Config(e.to_string()))
    }
}
