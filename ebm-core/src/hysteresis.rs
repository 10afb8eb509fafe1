//! Rising/falling analysis of sweep results
//!
//! Splits a sweep into its rising and falling branches, looks up the step
//! nearest a given multiplier on either branch, and locates tipping points:
//! consecutive steps whose mean temperature jumps by more than a threshold.

use crate::sweep::StepResult;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Temperature change (°C) between consecutive steps treated as a tipping point.
///
/// Equivalent to $\log_{10} |\Delta \bar{T}| > 1$.
pub const DEFAULT_JUMP_THRESHOLD: FloatValue = 10.0;

/// A labelled run of step results on one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSeries {
    pub label: String,
    pub results: Vec<StepResult>,
}

impl ResultSeries {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            results: Vec::new(),
        }
    }

    /// Step whose multiplier is closest to `solar_multiplier`.
    pub fn nearest(&self, solar_multiplier: FloatValue) -> Option<&StepResult> {
        self.results.iter().min_by(|a, b| {
            let da = (a.solar_multiplier - solar_multiplier).abs();
            let db = (b.solar_multiplier - solar_multiplier).abs();
            da.total_cmp(&db)
        })
    }

    /// Mean temperatures of the series, in sweep order.
    pub fn average_temperatures(&self) -> Vec<FloatValue> {
        self.results
            .iter()
            .map(|r| r.solution.average_temperature)
            .collect()
    }

    /// Consecutive steps whose mean temperature changes by more than `threshold`.
    pub fn tipping_points(&self, threshold: FloatValue) -> Vec<TippingPoint> {
        self.results
            .windows(2)
            .filter_map(|pair| {
                let change =
                    pair[1].solution.average_temperature - pair[0].solution.average_temperature;
                (change.abs() > threshold).then(|| TippingPoint {
                    rising: pair[1].is_rising(),
                    from_multiplier: pair[0].solar_multiplier,
                    to_multiplier: pair[1].solar_multiplier,
                    temperature_change: change,
                })
            })
            .collect()
    }
}

/// An abrupt change in mean temperature between two consecutive steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TippingPoint {
    pub rising: bool,
    pub from_multiplier: FloatValue,
    pub to_multiplier: FloatValue,
    /// Signed change in mean temperature (°C)
    pub temperature_change: FloatValue,
}

/// Sweep results split by direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HysteresisLoop {
    pub rising: ResultSeries,
    pub falling: ResultSeries,
}

impl Default for HysteresisLoop {
    fn default() -> Self {
        Self {
            rising: ResultSeries::new("Rising"),
            falling: ResultSeries::new("Falling"),
        }
    }
}

impl HysteresisLoop {
    pub fn from_results(results: impl IntoIterator<Item = StepResult>) -> Self {
        let mut hysteresis = Self::default();
        for result in results {
            hysteresis.push(result);
        }
        hysteresis
    }

    /// Append a step to the branch selected by the sign of its delta.
    pub fn push(&mut self, result: StepResult) {
        if result.is_rising() {
            self.rising.results.push(result);
        } else {
            self.falling.results.push(result);
        }
    }

    pub fn len(&self) -> usize {
        self.rising.results.len() + self.falling.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nearest_rising(&self, solar_multiplier: FloatValue) -> Option<&StepResult> {
        self.rising.nearest(solar_multiplier)
    }

    pub fn nearest_falling(&self, solar_multiplier: FloatValue) -> Option<&StepResult> {
        self.falling.nearest(solar_multiplier)
    }

    /// Smallest and largest solar multiplier visited.
    pub fn multiplier_range(&self) -> Option<(FloatValue, FloatValue)> {
        min_max(self.iter().map(|r| r.solar_multiplier))
    }

    /// Coldest and warmest mean temperature reached.
    pub fn temperature_range(&self) -> Option<(FloatValue, FloatValue)> {
        min_max(self.iter().map(|r| r.solution.average_temperature))
    }

    /// Tipping points on both branches, rising first.
    pub fn tipping_points(&self, threshold: FloatValue) -> Vec<TippingPoint> {
        let mut points = self.rising.tipping_points(threshold);
        points.extend(self.falling.tipping_points(threshold));
        points
    }

    fn iter(&self) -> impl Iterator<Item = &StepResult> {
        self.rising.results.iter().chain(&self.falling.results)
    }
}

fn min_max(values: impl Iterator<Item = FloatValue>) -> Option<(FloatValue, FloatValue)> {
    values.fold(None, |range, value| match range {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solution;

    fn step(delta: FloatValue, solar_multiplier: FloatValue, average: FloatValue) -> StepResult {
        StepResult {
            delta,
            solar_multiplier,
            solution: Solution {
                temperatures: vec![average],
                albedos: vec![0.3],
                average_temperature: average,
            },
        }
    }

    fn example_loop() -> HysteresisLoop {
        HysteresisLoop::from_results(vec![
            step(1.0, 1.0, -50.0),
            step(1.0, 2.0, -45.0),
            step(1.0, 3.0, 20.0),
            step(-1.0, 4.0, 30.0),
            step(-1.0, 3.0, 22.0),
            step(-1.0, 2.0, 5.0),
            step(-1.0, 1.0, -48.0),
        ])
    }

    #[test]
    fn test_split_by_direction() {
        let hysteresis = example_loop();
        assert_eq!(hysteresis.rising.results.len(), 3);
        assert_eq!(hysteresis.falling.results.len(), 4);
        assert_eq!(hysteresis.len(), 7);
        assert_eq!(hysteresis.rising.label, "Rising");
        assert_eq!(hysteresis.falling.label, "Falling");
    }

    #[test]
    fn test_nearest_lookup() {
        let hysteresis = example_loop();
        let rising = hysteresis.nearest_rising(2.2).unwrap();
        assert_eq!(rising.solar_multiplier, 2.0);
        assert_eq!(rising.solution.average_temperature, -45.0);

        let falling = hysteresis.nearest_falling(2.2).unwrap();
        assert_eq!(falling.solution.average_temperature, 5.0);

        assert!(HysteresisLoop::default().nearest_rising(1.0).is_none());
    }

    #[test]
    fn test_ranges() {
        let hysteresis = example_loop();
        assert_eq!(hysteresis.multiplier_range(), Some((1.0, 4.0)));
        assert_eq!(hysteresis.temperature_range(), Some((-50.0, 30.0)));
        assert_eq!(HysteresisLoop::default().multiplier_range(), None);
    }

    #[test]
    fn test_tipping_points() {
        let hysteresis = example_loop();
        let points = hysteresis.tipping_points(DEFAULT_JUMP_THRESHOLD);

        assert_eq!(points.len(), 3);
        assert!(points[0].rising);
        assert_eq!(points[0].from_multiplier, 2.0);
        assert_eq!(points[0].to_multiplier, 3.0);
        assert_eq!(points[0].temperature_change, 65.0);

        assert!(!points[1].rising);
        assert_eq!(points[1].temperature_change, -17.0);
        assert_eq!(points[2].temperature_change, -53.0);
    }
}
