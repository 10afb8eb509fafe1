//! Steady-state temperature solver
//!
//! Solves the coupled band temperature / albedo / global mean system for one
//! solar multiplier by damped fixed-point iteration.
//!
//! # Algorithm
//!
//! Each iteration:
//!
//! 1. assigns every band the ice or land albedo from its current temperature,
//! 2. computes the area-weighted global mean $\bar{T}$,
//! 3. updates every band with the closed-form balance
//!
//! $$T_i' = \frac{m S_i (1 - \alpha_i) + F \bar{T} - A}{B + F}$$
//!
//! The iteration stops once no band moves by more than
//! [`CONVERGENCE_THRESHOLD`]. The balance is re-applied because $\alpha_i$
//! depends on the temperature being solved for.

use crate::errors::{EBMError, EBMResult};
use crate::geometry::{LatitudeGeometry, SpatialGrid};
use crate::insolation::Insolation;
use crate::parameters::HeatParameters;
use crate::FloatValue;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Largest per-band temperature change (°C) accepted as converged.
pub const CONVERGENCE_THRESHOLD: FloatValue = 0.05;

/// Iteration budget used by [`TemperatureSolver::solve`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Converged state for one solar multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Band temperatures (°C), equator first
    pub temperatures: Vec<FloatValue>,
    /// Band albedos used for the final update
    pub albedos: Vec<FloatValue>,
    /// Area-weighted mean temperature (°C) used for the final update
    pub average_temperature: FloatValue,
}

impl Solution {
    /// Fraction of the hemisphere's area covered by ice.
    pub fn ice_fraction(&self, geometry: &LatitudeGeometry, ice_albedo: FloatValue) -> FloatValue {
        self.albedos
            .iter()
            .zip(geometry.area_fractions())
            .filter(|(albedo, _)| **albedo == ice_albedo)
            .map(|(_, fraction)| fraction)
            .sum()
    }
}

/// Fixed-point solver bound to one geometry, insolation and parameter set.
///
/// Holds no state between calls, so [`TemperatureSolver::solve`] is a pure
/// function of its arguments.
#[derive(Debug, Clone)]
pub struct TemperatureSolver {
    geometry: Arc<LatitudeGeometry>,
    insolation: Insolation,
    parameters: HeatParameters,
}

impl TemperatureSolver {
    /// Create a solver.
    ///
    /// # Panics
    ///
    /// Panics if `insolation` does not have one value per band of `geometry`
    pub fn new(
        geometry: Arc<LatitudeGeometry>,
        insolation: Insolation,
        parameters: HeatParameters,
    ) -> Self {
        assert_eq!(
            insolation.by_band().len(),
            geometry.num_zones(),
            "Insolation length must match grid size"
        );
        Self {
            geometry,
            insolation,
            parameters,
        }
    }

    pub fn geometry(&self) -> &Arc<LatitudeGeometry> {
        &self.geometry
    }

    pub fn insolation(&self) -> &Insolation {
        &self.insolation
    }

    pub fn parameters(&self) -> &HeatParameters {
        &self.parameters
    }

    /// Solve with the default budget of [`DEFAULT_MAX_ITERATIONS`].
    pub fn solve(
        &self,
        solar_multiplier: FloatValue,
        starting_temperatures: &[FloatValue],
    ) -> EBMResult<Solution> {
        self.solve_with_budget(
            solar_multiplier,
            starting_temperatures,
            DEFAULT_MAX_ITERATIONS,
        )
    }

    /// Solve for band temperatures and albedos at `solar_multiplier`.
    ///
    /// Returns [`EBMError::TemperatureLengthMismatch`] when the starting vector
    /// does not have one value per band, and [`EBMError::ConvergenceFailure`]
    /// when `max_iterations` updates do not reach [`CONVERGENCE_THRESHOLD`].
    pub fn solve_with_budget(
        &self,
        solar_multiplier: FloatValue,
        starting_temperatures: &[FloatValue],
        max_iterations: usize,
    ) -> EBMResult<Solution> {
        let num_zones = self.geometry.num_zones();
        if starting_temperatures.len() != num_zones {
            return Err(EBMError::TemperatureLengthMismatch {
                expected: num_zones,
                got: starting_temperatures.len(),
            });
        }

        let p = &self.parameters;
        let f = p.transport_coefficient;
        let a = p.radiative_loss_intercept;
        let denom = p.balance_denominator();

        let modulated: Vec<FloatValue> = self
            .insolation
            .by_band()
            .iter()
            .map(|insolation| solar_multiplier * insolation)
            .collect();

        let mut temperatures = starting_temperatures.to_vec();
        let mut max_difference = FloatValue::INFINITY;

        for iteration in 1..=max_iterations {
            let albedos: Vec<FloatValue> = temperatures.iter().map(|t| p.albedo(*t)).collect();
            let average_temperature = self.geometry.aggregate_global(&temperatures);

            let updated: Vec<FloatValue> = modulated
                .iter()
                .zip(&albedos)
                .map(|(insolation, albedo)| {
                    (insolation * (1.0 - albedo) + f * average_temperature - a) / denom
                })
                .collect();

            max_difference = temperatures
                .iter()
                .zip(&updated)
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, |largest, change| {
                    // Runaway bands give inf - inf = NaN, which never converges.
                    if change.is_nan() {
                        FloatValue::INFINITY
                    } else {
                        largest.max(change)
                    }
                });
            temperatures = updated;

            if max_difference <= CONVERGENCE_THRESHOLD {
                debug!(
                    "Converged after {} iterations (solar multiplier={}, average temperature={:.3})",
                    iteration, solar_multiplier, average_temperature
                );
                return Ok(Solution {
                    temperatures,
                    albedos,
                    average_temperature,
                });
            }
        }

        warn!(
            "No convergence after {} iterations (solar multiplier={}, max change={})",
            max_iterations, solar_multiplier, max_difference
        );
        Err(EBMError::ConvergenceFailure {
            iterations: max_iterations,
            solar_multiplier,
            max_difference,
        })
    }
}
