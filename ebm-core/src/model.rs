//! Sweep construction
//!
//! [`Model`] turns a [`ModelConfig`] and a sweep request into a ready-to-run
//! [`Sweep`]: it builds the geometry, the insolation and the solver, and lays
//! out the round-trip multiplier schedule.

use crate::config::{ModelConfig, SweepConfig};
use crate::errors::EBMResult;
use crate::geometry::LatitudeGeometry;
use crate::insolation::Insolation;
use crate::solver::TemperatureSolver;
use crate::sweep::{MultiplierSchedule, Sweep};
use crate::FloatValue;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Model {
    config: ModelConfig,
}

impl Model {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Override the latitudinal heat transport coefficient.
    pub fn with_transport_coefficient(mut self, transport_coefficient: FloatValue) -> Self {
        self.config.heat.transport_coefficient = transport_coefficient;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Build a solver for `num_bands` latitude bands.
    pub fn solver(&self, num_bands: usize) -> EBMResult<TemperatureSolver> {
        self.config.insolation.validate()?;
        let geometry = Arc::new(LatitudeGeometry::new(num_bands)?);
        let insolation = Insolation::from_distribution(
            self.config.distribution,
            &geometry,
            &self.config.insolation,
        );
        Ok(TemperatureSolver::new(
            geometry,
            insolation,
            self.config.heat.clone(),
        ))
    }

    /// Sweep the solar multiplier from `min_multiplier` to `max_multiplier` and back.
    ///
    /// Every band starts at `initial_temperature`. The range is split into
    /// `steps_per_direction` equal steps each way.
    pub fn gen_temps(
        &self,
        min_multiplier: FloatValue,
        max_multiplier: FloatValue,
        initial_temperature: FloatValue,
        num_bands: usize,
    ) -> EBMResult<Sweep> {
        let solver = self.solver(num_bands)?;
        let schedule = MultiplierSchedule::round_trip(
            min_multiplier,
            max_multiplier,
            self.config.steps_per_direction,
        )?;
        let sweep = Sweep::new(solver, schedule, vec![initial_temperature; num_bands])?;
        Ok(sweep.with_max_iterations(self.config.max_iterations))
    }

    /// Run the sweep described by `sweep`.
    pub fn sweep(&self, sweep: &SweepConfig) -> EBMResult<Sweep> {
        self.gen_temps(
            sweep.min_multiplier,
            sweep.max_multiplier,
            sweep.initial_temperature,
            sweep.num_bands,
        )
    }
}
