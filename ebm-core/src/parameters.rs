//! Model parameters
//!
//! Physical constants for the insolation calculation and the latitudinal
//! energy balance. Both structs deserialise with `#[serde(default)]`, so a
//! configuration file only needs to name the values it changes.

use crate::errors::{EBMError, EBMResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the annually-averaged insolation calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsolationParameters {
    /// Solar constant ($\text{W/m}^2$).
    /// Default: 1370.0
    pub solar_constant: FloatValue,

    /// Maximum tilt of the rotational axis relative to the ecliptic normal (degrees).
    /// Default: 23.5
    pub max_tilt: FloatValue,

    /// Number of discrete days averaged over one orbit.
    /// Default: 365
    pub days_in_year: u32,

    /// Hours per day. Only used by [`InsolationParameters::cylinder_solar_constant`].
    /// Default: 24
    pub hours_per_day: u32,
}

impl Default for InsolationParameters {
    fn default() -> Self {
        Self {
            solar_constant: 1370.0,
            max_tilt: 23.5,
            days_in_year: 365,
            hours_per_day: 24,
        }
    }
}

impl InsolationParameters {
    /// Reject parameter sets the insolation loops cannot average over.
    pub fn validate(&self) -> EBMResult<()> {
        if self.days_in_year == 0 {
            return Err(EBMError::Config(
                "days_in_year must be at least 1".to_string(),
            ));
        }
        if self.hours_per_day == 0 {
            return Err(EBMError::Config(
                "hours_per_day must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Planetary-average solar flux ($\text{W/m}^2$).
    ///
    /// A sphere intercepts radiation over its cross-section $\pi r^2$ but
    /// spreads it over its surface $4 \pi r^2$:
    ///
    /// $$S_{eff} = S / 4$$
    pub fn effective_solar_constant(&self) -> FloatValue {
        self.solar_constant / 4.0
    }

    /// Daily-mean flux for a point on a rotating cylinder ($\text{W/m}^2$).
    ///
    /// Averages the clipped cosine of the sun angle over 360 one-degree
    /// longitudes for each hourly noon offset. The result is $S / \pi$, the
    /// ratio of a cylinder's cross-section to its cap-less surface, not the
    /// spherical $S / 4$. Kept for comparison; the solver never uses it.
    ///
    /// An `hours_per_day` of zero is averaged as one hour; see
    /// [`InsolationParameters::validate`].
    pub fn cylinder_solar_constant(&self) -> FloatValue {
        const LONGITUDES: u32 = 360;
        let hours = self.hours_per_day.max(1);

        let mut sum = 0.0;
        for hour in 0..hours {
            let noon_angle = FloatValue::from(LONGITUDES) * FloatValue::from(hour)
                / FloatValue::from(hours);
            for longitude in 0..LONGITUDES {
                let sun_angle = (FloatValue::from(longitude) - noon_angle).to_radians();
                sum += sun_angle.cos().max(0.0);
            }
        }
        sum * self.solar_constant / (FloatValue::from(hours) * FloatValue::from(LONGITUDES))
    }
}

/// Parameters for the latitudinal energy balance and ice-albedo feedback.
///
/// Each band satisfies
///
/// $$S_i (1 - \alpha_i) = A + B T_i + F (T_i - \bar{T})$$
///
/// where $F$ is the meridional transport coefficient and $A + B T$ the
/// linearised outgoing longwave radiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatParameters {
    /// Latitudinal heat transport coefficient $F$ ($\text{W/m}^2\text{/°C}$).
    /// Default: 7.6
    pub transport_coefficient: FloatValue,

    /// Radiative heat-loss intercept $A$ ($\text{W/m}^2$).
    /// Default: 204.0
    pub radiative_loss_intercept: FloatValue,

    /// Radiative heat-loss slope $B$ ($\text{W/m}^2\text{/°C}$).
    /// Default: 2.17
    pub radiative_loss_slope: FloatValue,

    /// Albedo of an ice-covered band.
    /// Default: 0.6
    pub ice_albedo: FloatValue,

    /// Albedo of an ice-free band.
    /// Default: 0.3
    pub land_albedo: FloatValue,

    /// Temperature (°C) at or below which a band is ice covered.
    /// Default: -10.0
    pub critical_temperature: FloatValue,
}

impl Default for HeatParameters {
    fn default() -> Self {
        Self {
            transport_coefficient: 7.6,
            radiative_loss_intercept: 204.0,
            radiative_loss_slope: 2.17,
            ice_albedo: 0.6,
            land_albedo: 0.3,
            critical_temperature: -10.0,
        }
    }
}

impl HeatParameters {
    /// Albedo of a band at `temperature`.
    ///
    /// A hard step at the critical temperature. The discontinuity is what
    /// makes the steady state depend on the band's history.
    pub fn albedo(&self, temperature: FloatValue) -> FloatValue {
        if temperature <= self.critical_temperature {
            self.ice_albedo
        } else {
            self.land_albedo
        }
    }

    /// Denominator $B + F$ of the closed-form band temperature.
    pub fn balance_denominator(&self) -> FloatValue {
        self.radiative_loss_slope + self.transport_coefficient
    }
}
