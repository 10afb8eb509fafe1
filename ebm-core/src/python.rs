//! Python bindings
//!
//! Exposes the geometry, solver and lazy sweep to Python so a front end can
//! pull one step at a time (for example from a UI timer) and render results as
//! they arrive.

use crate::config::ModelConfig;
use crate::errors::EBMError;
use crate::geometry::LatitudeGeometry;
use crate::insolation::InsolationDistribution;
use crate::model::Model;
use crate::solver::{Solution, TemperatureSolver, DEFAULT_MAX_ITERATIONS};
use crate::sweep::{StepResult, Sweep};
use crate::FloatValue;
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::prelude::*;
use std::sync::Arc;

create_exception!(core, ConvergenceError, PyException);

impl From<EBMError> for PyErr {
    fn from(err: EBMError) -> PyErr {
        match err {
            EBMError::ConvergenceFailure { .. } => ConvergenceError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Latitude bands of one hemisphere, equator first.
#[pyclass]
#[pyo3(name = "Geometry")]
#[derive(Debug, Clone)]
pub struct PyGeometry(pub Arc<LatitudeGeometry>);

#[pymethods]
impl PyGeometry {
    #[new]
    fn new(num_zones: usize) -> PyResult<Self> {
        Ok(Self(Arc::new(LatitudeGeometry::new(num_zones)?)))
    }

    #[getter]
    fn num_zones(&self) -> usize {
        self.0.num_zones()
    }

    #[getter]
    fn half_width(&self) -> FloatValue {
        self.0.half_width()
    }

    #[getter]
    fn band_centers(&self) -> Vec<FloatValue> {
        self.0.band_centers().to_vec()
    }

    #[getter]
    fn band_heights(&self) -> Vec<FloatValue> {
        self.0.band_heights().to_vec()
    }

    #[getter]
    fn area_fractions(&self) -> Vec<FloatValue> {
        self.0.area_fractions().to_vec()
    }

    /// Values ordered from the south pole to the north pole
    fn mirror_to_full_sphere(&self, values: Vec<FloatValue>) -> PyResult<Vec<FloatValue>> {
        if values.len() != self.0.num_zones() {
            return Err(EBMError::TemperatureLengthMismatch {
                expected: self.0.num_zones(),
                got: values.len(),
            }
            .into());
        }
        Ok(self.0.mirror_to_full_sphere(&values))
    }
}

#[pyclass]
#[pyo3(name = "Solution")]
#[derive(Debug, Clone)]
pub struct PySolution(pub Solution);

#[pymethods]
impl PySolution {
    #[getter]
    fn temperatures(&self) -> Vec<FloatValue> {
        self.0.temperatures.clone()
    }

    #[getter]
    fn albedos(&self) -> Vec<FloatValue> {
        self.0.albedos.clone()
    }

    #[getter]
    fn average_temperature(&self) -> FloatValue {
        self.0.average_temperature
    }

    fn __repr__(&self) -> String {
        format!(
            "Solution(average_temperature={:.3}, bands={})",
            self.0.average_temperature,
            self.0.temperatures.len()
        )
    }
}

#[pyclass]
#[pyo3(name = "StepResult")]
#[derive(Debug, Clone)]
pub struct PyStepResult(pub StepResult);

#[pymethods]
impl PyStepResult {
    #[getter]
    fn delta(&self) -> FloatValue {
        self.0.delta
    }

    #[getter]
    fn solar_multiplier(&self) -> FloatValue {
        self.0.solar_multiplier
    }

    #[getter]
    fn solution(&self) -> PySolution {
        PySolution(self.0.solution.clone())
    }

    fn __repr__(&self) -> String {
        format!(
            "StepResult(delta={}, solar_multiplier={}, average_temperature={:.3})",
            self.0.delta, self.0.solar_multiplier, self.0.solution.average_temperature
        )
    }
}

#[pyclass]
#[pyo3(name = "TemperatureSolver")]
#[derive(Debug, Clone)]
pub struct PyTemperatureSolver(pub TemperatureSolver);

#[pymethods]
impl PyTemperatureSolver {
    #[new]
    #[pyo3(signature = (num_bands, transport_coefficient=7.6, distribution="uniform"))]
    fn new(num_bands: usize, transport_coefficient: FloatValue, distribution: &str) -> PyResult<Self> {
        let config = ModelConfig {
            distribution: distribution.parse::<InsolationDistribution>()?,
            ..Default::default()
        };
        let model = Model::new(config).with_transport_coefficient(transport_coefficient);
        Ok(Self(model.solver(num_bands)?))
    }

    #[getter]
    fn insolation(&self) -> Vec<FloatValue> {
        self.0.insolation().by_band().to_vec()
    }

    #[getter]
    fn geometry(&self) -> PyGeometry {
        PyGeometry(self.0.geometry().clone())
    }

    #[pyo3(signature = (solar_multiplier, starting_temperatures, max_iterations=DEFAULT_MAX_ITERATIONS))]
    fn solve(
        &self,
        solar_multiplier: FloatValue,
        starting_temperatures: Vec<FloatValue>,
        max_iterations: usize,
    ) -> PyResult<PySolution> {
        let solution =
            self.0
                .solve_with_budget(solar_multiplier, &starting_temperatures, max_iterations)?;
        Ok(PySolution(solution))
    }
}

/// Lazy sweep; iterate to receive one `StepResult` per solar multiplier.
#[pyclass]
#[pyo3(name = "Sweep")]
#[derive(Debug)]
pub struct PySweep(pub Sweep);

#[pymethods]
impl PySweep {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> PyResult<Option<PyStepResult>> {
        match slf.0.next() {
            Some(Ok(step)) => Ok(Some(PyStepResult(step))),
            Some(Err(err)) => Err(err.into()),
            None => Ok(None),
        }
    }

    /// "Ascending", "Descending" or "Done"
    #[getter]
    fn phase(&self) -> String {
        format!("{:?}", self.0.phase())
    }
}

/// Sweep the solar multiplier up from `min_multiplier` and back down.
#[pyfunction]
#[pyo3(signature = (min_multiplier, max_multiplier, initial_temperature, num_bands, transport_coefficient=7.6))]
pub fn gen_temps(
    min_multiplier: FloatValue,
    max_multiplier: FloatValue,
    initial_temperature: FloatValue,
    num_bands: usize,
    transport_coefficient: FloatValue,
) -> PyResult<PySweep> {
    let sweep = Model::default()
        .with_transport_coefficient(transport_coefficient)
        .gen_temps(min_multiplier, max_multiplier, initial_temperature, num_bands)?;
    Ok(PySweep(sweep))
}

#[pymodule]
pub fn core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGeometry>()?;
    m.add_class::<PySolution>()?;
    m.add_class::<PyStepResult>()?;
    m.add_class::<PyTemperatureSolver>()?;
    m.add_class::<PySweep>()?;
    m.add_function(wrap_pyfunction!(gen_temps, m)?)?;
    m.add("ConvergenceError", m.py().get_type_bound::<ConvergenceError>())?;
    Ok(())
}
