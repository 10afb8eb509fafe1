//! Annually-averaged insolation per latitude band
//!
//! Two distributions are available:
//!
//! - [`Insolation::uniform`], the default, assumes the tilt averages out over
//!   a year and spreads the effective solar constant by band area alone. The
//!   bands sum to $S / 4$.
//! - [`Insolation::seasonal`] averages the clipped solar zenith angle over every
//!   day of the year as the axial tilt swings between $\pm$ `max_tilt`.
//!   Zenith clipping drops the night side, so with any tilt the bands sum to
//!   less than $S / 4$.
//!
//! Both return values that are already weighted by band area, so their sum is
//! the planetary-average incident flux.

use crate::errors::{EBMError, EBMResult};
use crate::geometry::LatitudeGeometry;
use crate::parameters::InsolationParameters;
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Which insolation distribution feeds the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsolationDistribution {
    /// Day-by-day average over the axial tilt cycle
    Seasonal,
    /// Tilt-free, proportional to band area
    #[default]
    Uniform,
}

impl FromStr for InsolationDistribution {
    type Err = EBMError;

    fn from_str(s: &str) -> EBMResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "seasonal" => Ok(Self::Seasonal),
            "uniform" => Ok(Self::Uniform),
            other => Err(EBMError::Config(format!(
                "Unknown insolation distribution '{}'. Expected 'seasonal' or 'uniform'",
                other
            ))),
        }
    }
}

impl fmt::Display for InsolationDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seasonal => write!(f, "seasonal"),
            Self::Uniform => write!(f, "uniform"),
        }
    }
}

/// Incident solar power per latitude band ($\text{W/m}^2$).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insolation {
    by_band: Vec<FloatValue>,
}

impl Insolation {
    /// Build the insolation for `distribution`.
    pub fn from_distribution(
        distribution: InsolationDistribution,
        geometry: &LatitudeGeometry,
        params: &InsolationParameters,
    ) -> Self {
        match distribution {
            InsolationDistribution::Seasonal => Self::seasonal(geometry, params),
            InsolationDistribution::Uniform => Self::uniform(geometry, params),
        }
    }

    /// Insolation averaged over `days_in_year` discrete days.
    ///
    /// For day fraction $d$ the tilt is $\theta_{max} \cos(2 \pi d)$ and a band at
    /// latitude $\phi$ sees the sun at zenith angle $\min(\phi + \theta, \pi/2)$.
    /// Each day contributes `area_fraction * max(0, cos(zenith))`, and the yearly
    /// total is scaled by $S_{eff} / N_{days}$.
    ///
    /// With `max_tilt = 0` this reduces to [`Insolation::uniform`]. A
    /// `days_in_year` of zero is averaged as a single day;
    /// [`InsolationParameters::validate`] rejects it before a model is built.
    pub fn seasonal(geometry: &LatitudeGeometry, params: &InsolationParameters) -> Self {
        let days = params.days_in_year.max(1);
        let max_tilt = params.max_tilt.to_radians();
        let mut totals = vec![0.0; geometry.num_zones()];

        for day in 0..days {
            let year_fraction = FloatValue::from(day + 1) / FloatValue::from(days);
            let tilt = max_tilt * (2.0 * PI * year_fraction).cos();

            for ((total, lat), fraction) in totals
                .iter_mut()
                .zip(geometry.band_centers())
                .zip(geometry.area_fractions())
            {
                let zenith = (lat + tilt).min(FRAC_PI_2);
                *total += fraction * zenith.cos().max(0.0);
            }
        }

        let scale = params.effective_solar_constant() / FloatValue::from(days);
        Self {
            by_band: totals.into_iter().map(|total| total * scale).collect(),
        }
    }

    /// Tilt-free insolation: $S_{eff}$ times each band's area fraction.
    pub fn uniform(geometry: &LatitudeGeometry, params: &InsolationParameters) -> Self {
        let solar_constant = params.effective_solar_constant();
        Self {
            by_band: geometry
                .area_fractions()
                .iter()
                .map(|fraction| solar_constant * fraction)
                .collect(),
        }
    }

    /// Insolation for each band, equator first.
    pub fn by_band(&self) -> &[FloatValue] {
        &self.by_band
    }

    /// Planetary-average incident flux: the sum of the area-weighted bands.
    pub fn total(&self) -> FloatValue {
        self.by_band.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BAND_COUNTS: [usize; 3] = [9, 18, 36];

    #[test]
    fn test_uniform_sums_to_effective_solar_constant() {
        let params = InsolationParameters::default();
        for n in BAND_COUNTS {
            let geometry = LatitudeGeometry::new(n).unwrap();
            let insolation = Insolation::uniform(&geometry, &params);
            assert_eq!(insolation.by_band().len(), n);
            assert_relative_eq!(insolation.total(), 342.5, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_seasonal_without_tilt_matches_uniform() {
        let params = InsolationParameters {
            max_tilt: 0.0,
            ..Default::default()
        };
        let geometry = LatitudeGeometry::new(9).unwrap();

        let seasonal = Insolation::seasonal(&geometry, &params);
        let uniform = Insolation::uniform(&geometry, &params);

        for (s, u) in seasonal.by_band().iter().zip(uniform.by_band()) {
            assert_relative_eq!(s, u, max_relative = 1e-9);
        }
        assert_relative_eq!(seasonal.total(), 342.5, max_relative = 1e-9);
    }

    #[test]
    fn test_default_distribution_sums_to_effective_solar_constant() {
        let params = InsolationParameters::default();
        for n in BAND_COUNTS {
            let geometry = LatitudeGeometry::new(n).unwrap();
            let insolation = Insolation::from_distribution(
                InsolationDistribution::default(),
                &geometry,
                &params,
            );
            assert_relative_eq!(insolation.total(), 342.5, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_seasonal_tilt_reduces_planetary_mean() {
        let geometry = LatitudeGeometry::new(9).unwrap();
        let insolation = Insolation::seasonal(&geometry, &InsolationParameters::default());

        let total = insolation.total();
        assert!(total > 0.0);
        assert!(total < 342.5, "total = {}", total);
    }

    #[test]
    fn test_seasonal_polar_band_receives_least() {
        let geometry = LatitudeGeometry::new(9).unwrap();
        let insolation = Insolation::seasonal(&geometry, &InsolationParameters::default());
        let values = insolation.by_band();

        assert!(values.iter().all(|v| *v >= 0.0));
        assert!(values.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_seasonal_is_deterministic() {
        let geometry = LatitudeGeometry::new(18).unwrap();
        let params = InsolationParameters::default();
        assert_eq!(
            Insolation::seasonal(&geometry, &params),
            Insolation::seasonal(&geometry, &params)
        );
    }

    #[test]
    fn test_scales_with_solar_constant() {
        let geometry = LatitudeGeometry::new(9).unwrap();
        let base = Insolation::seasonal(&geometry, &InsolationParameters::default());
        let doubled = Insolation::seasonal(
            &geometry,
            &InsolationParameters {
                solar_constant: 2740.0,
                ..Default::default()
            },
        );
        assert_relative_eq!(doubled.total(), 2.0 * base.total(), max_relative = 1e-12);
    }

    #[test]
    fn test_from_distribution() {
        let geometry = LatitudeGeometry::new(9).unwrap();
        let params = InsolationParameters::default();
        assert_eq!(
            Insolation::from_distribution(InsolationDistribution::Uniform, &geometry, &params),
            Insolation::uniform(&geometry, &params)
        );
        assert_eq!(InsolationDistribution::default(), InsolationDistribution::Uniform);
    }

    #[test]
    fn test_distribution_names() {
        assert_eq!(
            "Uniform".parse::<InsolationDistribution>().unwrap(),
            InsolationDistribution::Uniform
        );
        assert_eq!(InsolationDistribution::Seasonal.to_string(), "seasonal");
        assert!(matches!(
            "daily".parse::<InsolationDistribution>(),
            Err(EBMError::Config(_))
        ));
    }
}
