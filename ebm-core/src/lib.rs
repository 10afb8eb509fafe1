//! One-dimensional latitudinal energy-balance model
//!
//! The model splits a hemisphere into latitude bands, averages insolation over
//! a year for each band, and solves for the steady-state band temperatures
//! under an ice-albedo feedback. Sweeping the solar multiplier up and back
//! down exposes hysteresis: the same forcing yields a frozen or a thawed
//! planet depending on the path taken.
//!
//! Data flows one way: [`geometry`] → [`insolation`] → [`solver`] → [`sweep`].
//!
//! ```rust
//! use ebm_core::model::Model;
//!
//! let sweep = Model::default().gen_temps(0.1, 2.0, -60.0, 9).unwrap();
//! for step in sweep {
//!     let step = step.unwrap();
//!     assert!(step.solar_multiplier >= 0.1 && step.solar_multiplier <= 2.0);
//! }
//! ```

pub mod config;
pub mod errors;
pub mod geometry;
pub mod hysteresis;
pub mod insolation;
pub mod model;
pub mod parameters;
#[cfg(feature = "python")]
pub mod python;
pub mod solver;
pub mod sweep;

pub type FloatValue = f64;

pub use errors::{EBMError, EBMResult};
pub use model::Model;
pub use solver::{Solution, TemperatureSolver};
pub use sweep::{StepResult, Sweep};
