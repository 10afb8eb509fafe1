//! Energy-balance model facade
//!
//! Re-exports [`ebm_core`]. With the `python` feature this crate also builds the
//! `_lib` extension module imported by the Python front end.

pub use ebm_core::*;

#[cfg(feature = "python")]
mod python;
