use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use hypersolve::Parametrization;

use crate::{coefficient, coefficient_to_string, py_err};

#[pyclass(name = "Parametrization")]
#[derive(Clone)]
pub struct PyParametrization {
    pub(crate) inner: Parametrization,
}

#[pymethods]
impl PyParametrization {
    #[getter]
    pub fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    /// The basepoint as a list of decimal strings
    #[getter]
    pub fn basepoint(&self) -> Vec<String> {
        self.inner
            .basepoint()
            .iter()
            .map(|&c| coefficient_to_string(c))
            .collect()
    }

    /// One list of decimal strings per free variable
    #[getter]
    pub fn direction_vectors(&self) -> Vec<Vec<String>> {
        self.inner
            .direction_vectors()
            .iter()
            .map(|v| v.iter().map(|&c| coefficient_to_string(c)).collect())
            .collect()
    }

    /// Returns true if the solution set is a single point
    pub fn is_unique(&self) -> bool {
        self.inner.is_unique()
    }

    /// Evaluates the parametrization at one value per free variable
    pub fn point_at(&self, params: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
        let params = params
            .try_iter()?
            .map(|c| coefficient(&c?))
            .collect::<PyResult<Vec<_>>>()?;
        let point = self.inner.point_at(&params).map_err(py_err)?;
        Ok(point.iter().map(|&c| coefficient_to_string(c)).collect())
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "Parametrization(dimension={}, free_variables={})",
            self.inner.dimension(),
            self.inner.free_variables()
        )
    }

    pub fn __eq__(&self, other: &PyParametrization) -> bool {
        self.inner == other.inner
    }

    /// Compares with another parametrization coordinate-wise within `tolerance`
    pub fn approx_eq(
        &self,
        other: &PyParametrization,
        tolerance: &Bound<'_, PyAny>,
    ) -> PyResult<bool> {
        let tolerance = coefficient(tolerance)?;
        if tolerance.is_sign_negative() {
            return Err(PyValueError::new_err("tolerance must not be negative"));
        }
        Ok(self
            .inner
            .approx_eq(&other.inner, hypersolve::Tolerance::new(tolerance)))
    }
}

impl From<Parametrization> for PyParametrization {
    fn from(inner: Parametrization) -> Self {
        PyParametrization { inner }
    }
}
