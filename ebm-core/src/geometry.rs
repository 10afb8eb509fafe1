//! Latitude-band geometry
//!
//! This module provides the [`SpatialGrid`] trait and [`LatitudeGeometry`], which divides one
//! hemisphere into equal-angle latitude bands, ordered from the equator towards the pole.
//!
//! # Examples
//!
//! ```rust
//! use ebm_core::geometry::{LatitudeGeometry, SpatialGrid};
//!
//! let geometry = LatitudeGeometry::new(9).unwrap();
//! assert_eq!(geometry.size(), 9);
//!
//! // Uniform values aggregate to themselves
//! let temps = vec![15.0; 9];
//! let global = geometry.aggregate_global(&temps);
//! assert!((global - 15.0).abs() < 1e-9);
//! ```

use crate::errors::{EBMError, EBMResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Trait for spatial grids whose regions carry area weights.
pub trait SpatialGrid: Clone + std::fmt::Debug + Send + Sync {
    /// Unique name for this grid type
    fn grid_name(&self) -> &'static str;

    /// Number of spatial regions in this grid
    fn size(&self) -> usize;

    /// Fractional area of each region. Sums to one.
    fn weights(&self) -> &[FloatValue];

    /// Aggregate all regional values to a single area-weighted global value
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` does not match `self.size()`
    fn aggregate_global(&self, values: &[FloatValue]) -> FloatValue {
        assert_eq!(
            values.len(),
            self.size(),
            "Values length must match grid size"
        );
        self.weights()
            .iter()
            .zip(values)
            .map(|(weight, value)| weight * value)
            .sum()
    }
}

/// One hemisphere split into `num_zones` equal-angle latitude bands.
///
/// All per-band vectors share the same ordering: index 0 is the band next to
/// the equator, the last index the band at the pole. Clients treat the
/// geometry as read-only; it is shared behind an `Arc` by the solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatitudeGeometry {
    num_zones: usize,
    /// Half the angular width of one band (radians)
    half_width: FloatValue,
    /// Central latitude of each band (radians)
    band_centers: Vec<FloatValue>,
    /// Projected height of each band onto the polar axis of a unit sphere
    band_heights: Vec<FloatValue>,
    /// Fractional share of the hemisphere's area
    area_fractions: Vec<FloatValue>,
}

impl LatitudeGeometry {
    /// Build the geometry for `num_zones` bands per hemisphere.
    ///
    /// Returns [`EBMError::InvalidBandCount`] when `num_zones` is zero.
    pub fn new(num_zones: usize) -> EBMResult<Self> {
        if num_zones == 0 {
            return Err(EBMError::InvalidBandCount { num_bands: num_zones });
        }

        let zone_width = FRAC_PI_2 / num_zones as FloatValue;
        let half_width = zone_width / 2.0;

        let band_centers: Vec<FloatValue> = (0..num_zones)
            .map(|i| half_width + i as FloatValue * zone_width)
            .collect();

        // Heights telescope: the sum is sin(90°) - sin(0°) = 1.
        let band_heights: Vec<FloatValue> = band_centers
            .iter()
            .map(|lat| (lat + half_width).sin() - (lat - half_width).sin())
            .collect();

        // Each band is treated as a cylinder of radius cos(lat).
        let areas: Vec<FloatValue> = band_centers
            .iter()
            .zip(&band_heights)
            .map(|(lat, height)| lat.cos() * height)
            .collect();
        let total_area: FloatValue = areas.iter().sum();
        let area_fractions = areas.iter().map(|area| area / total_area).collect();

        Ok(Self {
            num_zones,
            half_width,
            band_centers,
            band_heights,
            area_fractions,
        })
    }

    pub fn num_zones(&self) -> usize {
        self.num_zones
    }

    pub fn half_width(&self) -> FloatValue {
        self.half_width
    }

    pub fn band_centers(&self) -> &[FloatValue] {
        &self.band_centers
    }

    pub fn band_heights(&self) -> &[FloatValue] {
        &self.band_heights
    }

    pub fn area_fractions(&self) -> &[FloatValue] {
        &self.area_fractions
    }

    /// Inner (equatorward) and outer (poleward) edge of each band, radians.
    pub fn band_edges(&self) -> Vec<(FloatValue, FloatValue)> {
        self.band_centers
            .iter()
            .map(|lat| (lat - self.half_width, lat + self.half_width))
            .collect()
    }

    /// Reflect per-band hemisphere values onto both hemispheres.
    ///
    /// The result runs from the south pole through the equator to the north
    /// pole and has `2 * num_zones` entries.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` does not match the number of bands
    pub fn mirror_to_full_sphere<T: Clone>(&self, values: &[T]) -> Vec<T> {
        assert_eq!(
            values.len(),
            self.num_zones,
            "Values length must match grid size"
        );
        values.iter().rev().chain(values.iter()).cloned().collect()
    }
}

impl SpatialGrid for LatitudeGeometry {
    fn grid_name(&self) -> &'static str {
        "LatitudeBands"
    }

    fn size(&self) -> usize {
        self.num_zones
    }

    fn weights(&self) -> &[FloatValue] {
        &self.area_fractions
    }
}
