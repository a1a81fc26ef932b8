use pyo3::prelude::*;

use hypersolve::{Hyperplane, Vector};

use crate::{coefficient, coefficient_to_string};

#[pyclass(name = "Hyperplane")]
#[derive(Clone)]
pub struct PyHyperplane {
    pub(crate) inner: Hyperplane,
}

#[pymethods]
impl PyHyperplane {
    /// Creates the equation `normal_vector · x = constant_term`
    ///
    /// Coefficients may be strings, ints, floats or `decimal.Decimal`s.
    #[new]
    pub fn new(
        normal_vector: &Bound<'_, PyAny>,
        constant_term: &Bound<'_, PyAny>,
    ) -> PyResult<Self> {
        let normal_vector = normal_vector
            .try_iter()?
            .map(|c| coefficient(&c?))
            .collect::<PyResult<Vector>>()?;
        Ok(PyHyperplane {
            inner: Hyperplane::new(normal_vector, coefficient(constant_term)?),
        })
    }

    /// Creates the trivial equation `0 = 0`
    #[staticmethod]
    pub fn zero(dimension: usize) -> Self {
        PyHyperplane {
            inner: Hyperplane::zero(dimension),
        }
    }

    #[getter]
    pub fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    /// The coefficients as decimal strings
    #[getter]
    pub fn normal_vector(&self) -> Vec<String> {
        self.inner
            .normal_vector()
            .iter()
            .map(|&c| coefficient_to_string(c))
            .collect()
    }

    /// The constant term as a decimal string
    #[getter]
    pub fn constant_term(&self) -> String {
        coefficient_to_string(self.inner.constant_term())
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Hyperplane({})", self.inner)
    }

    pub fn __eq__(&self, other: &PyHyperplane) -> bool {
        self.inner == other.inner
    }
}

impl From<Hyperplane> for PyHyperplane {
    fn from(inner: Hyperplane) -> Self {
        PyHyperplane { inner }
    }
}
