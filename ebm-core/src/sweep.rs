//! Solar-multiplier sweeps
//!
//! A [`Sweep`] drives a [`TemperatureSolver`] up an ascending list of solar
//! multipliers and back down a descending one. Each solve starts from the
//! temperatures of the previous step, so the descending branch begins wherever
//! the ascending branch left off. That chaining is what exposes hysteresis.
//!
//! The sweep is a lazy, one-pass [`Iterator`]: each step is solved when it is
//! requested. A convergence failure is yielded once and ends the sweep; the
//! steps already yielded stay valid.

use crate::errors::{EBMError, EBMResult};
use crate::solver::{Solution, TemperatureSolver, DEFAULT_MAX_ITERATIONS};
use crate::FloatValue;
use log::info;
use serde::{Deserialize, Serialize};

/// Position of a sweep in its ascending/descending cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Ascending,
    Descending,
    Done,
}

/// One solved step of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Signed step size: positive while ascending, negative while descending
    pub delta: FloatValue,
    pub solar_multiplier: FloatValue,
    pub solution: Solution,
}

impl StepResult {
    pub fn is_rising(&self) -> bool {
        self.delta > 0.0
    }
}

/// Ascending and descending solar multipliers for one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierSchedule {
    delta: FloatValue,
    ascending: Vec<FloatValue>,
    descending: Vec<FloatValue>,
}

impl MultiplierSchedule {
    /// `steps` equal steps from `min` towards `max`, then `steps` back from `max`.
    ///
    /// Neither list includes its far endpoint: ascending covers `[min, max)` and
    /// descending `(min, max]`.
    pub fn round_trip(min: FloatValue, max: FloatValue, steps: usize) -> EBMResult<Self> {
        validate_range(min, max)?;
        if steps == 0 {
            return Err(EBMError::InvalidStep { step: 0.0 });
        }

        let delta = (max - min) / steps as FloatValue;
        Ok(Self {
            delta,
            ascending: (0..steps).map(|i| min + i as FloatValue * delta).collect(),
            descending: (0..steps).map(|i| max - i as FloatValue * delta).collect(),
        })
    }

    /// Multipliers spaced by `step` over `[min, max)` and then `(min, max]`.
    pub fn stepped(min: FloatValue, max: FloatValue, step: FloatValue) -> EBMResult<Self> {
        validate_range(min, max)?;
        if !step.is_finite() || step <= 0.0 {
            return Err(EBMError::InvalidStep { step });
        }

        let ascending = (0..)
            .map(|i| min + i as FloatValue * step)
            .take_while(|m| *m < max)
            .collect();
        let descending = (0..)
            .map(|i| max - i as FloatValue * step)
            .take_while(|m| *m > min)
            .collect();
        Ok(Self {
            delta: step,
            ascending,
            descending,
        })
    }

    /// Unsigned step between consecutive multipliers.
    pub fn delta(&self) -> FloatValue {
        self.delta
    }

    pub fn ascending(&self) -> &[FloatValue] {
        &self.ascending
    }

    pub fn descending(&self) -> &[FloatValue] {
        &self.descending
    }

    /// Total number of steps in both directions.
    pub fn len(&self) -> usize {
        self.ascending.len() + self.descending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_range(min: FloatValue, max: FloatValue) -> EBMResult<()> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Err(EBMError::InvalidSweepRange { min, max });
    }
    Ok(())
}

/// Lazy ascending-then-descending sweep over a [`MultiplierSchedule`].
#[derive(Debug)]
pub struct Sweep {
    solver: TemperatureSolver,
    schedule: MultiplierSchedule,
    phase: Phase,
    position: usize,
    temperatures: Vec<FloatValue>,
    max_iterations: usize,
}

impl Sweep {
    /// Create a sweep whose first solve starts from `initial_temperatures`.
    pub fn new(
        solver: TemperatureSolver,
        schedule: MultiplierSchedule,
        initial_temperatures: Vec<FloatValue>,
    ) -> EBMResult<Self> {
        let expected = solver.geometry().num_zones();
        if initial_temperatures.len() != expected {
            return Err(EBMError::TemperatureLengthMismatch {
                expected,
                got: initial_temperatures.len(),
            });
        }

        Ok(Self {
            solver,
            schedule,
            phase: Phase::Ascending,
            position: 0,
            temperatures: initial_temperatures,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    /// Override the per-step iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn schedule(&self) -> &MultiplierSchedule {
        &self.schedule
    }

    pub fn solver(&self) -> &TemperatureSolver {
        &self.solver
    }

    /// Temperatures the next solve will start from.
    pub fn current_temperatures(&self) -> &[FloatValue] {
        &self.temperatures
    }

    /// Advance the schedule, returning the next multiplier and its signed step.
    fn next_multiplier(&mut self) -> Option<(FloatValue, FloatValue)> {
        loop {
            let (values, delta) = match self.phase {
                Phase::Ascending => (&self.schedule.ascending, self.schedule.delta),
                Phase::Descending => (&self.schedule.descending, -self.schedule.delta),
                Phase::Done => return None,
            };

            if let Some(multiplier) = values.get(self.position) {
                self.position += 1;
                return Some((*multiplier, delta));
            }

            self.position = 0;
            self.phase = match self.phase {
                Phase::Ascending => Phase::Descending,
                _ => Phase::Done,
            };
            info!("Sweep phase is now {:?}", self.phase);
        }
    }
}

impl Iterator for Sweep {
    type Item = EBMResult<StepResult>;

    fn next(&mut self) -> Option<Self::Item> {
        let (solar_multiplier, delta) = self.next_multiplier()?;

        match self
            .solver
            .solve_with_budget(solar_multiplier, &self.temperatures, self.max_iterations)
        {
            Ok(solution) => {
                self.temperatures.clone_from(&solution.temperatures);
                Some(Ok(StepResult {
                    delta,
                    solar_multiplier,
                    solution,
                }))
            }
            Err(err) => {
                self.phase = Phase::Done;
                Some(Err(err))
            }
        }
    }
}
