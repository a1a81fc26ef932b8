use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use hypersolve::{LinearSystem, Solution, Tolerance};
use rand::{rngs::SmallRng, SeedableRng};

use crate::hyperplane::PyHyperplane;
use crate::parametrization::PyParametrization;
use crate::{coefficient, py_err};

#[pyclass(name = "LinearSystem")]
#[derive(Clone)]
pub struct PyLinearSystem {
    pub(crate) inner: LinearSystem,
}

impl PyLinearSystem {
    fn check_row(&self, row: usize) -> PyResult<()> {
        if row >= self.inner.len() {
            return Err(PyIndexError::new_err("Row index out of bounds"));
        }
        Ok(())
    }
}

#[pymethods]
impl PyLinearSystem {
    /// Creates a linear system from a non-empty list of hyperplanes of the same dimension
    #[new]
    pub fn new(rows: Vec<PyHyperplane>) -> PyResult<Self> {
        let rows = rows.into_iter().map(|r| r.inner).collect();
        let inner = LinearSystem::new(rows).map_err(py_err)?;
        Ok(PyLinearSystem { inner })
    }

    /// Creates a random system with integer coefficients in `[-bound, bound]`
    #[staticmethod]
    #[pyo3(signature = (rows, dimension, bound=10, seed=None))]
    pub fn random(rows: usize, dimension: usize, bound: i64, seed: Option<u64>) -> PyResult<Self> {
        if rows == 0 {
            return Err(PyValueError::new_err("A linear system needs at least one row"));
        }
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        let bound = bound.abs();
        Ok(PyLinearSystem {
            inner: LinearSystem::random(&mut rng, rows, dimension, -bound..=bound),
        })
    }

    /// Replaces the tolerance used to decide when a coefficient is zero
    pub fn set_tolerance(&mut self, tolerance: &Bound<'_, PyAny>) -> PyResult<()> {
        let tolerance = Tolerance::new(coefficient(tolerance)?);
        self.inner.set_tolerance(tolerance);
        Ok(())
    }

    #[getter]
    pub fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    /// Exchanges two rows
    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> PyResult<()> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        self.inner.swap_rows(row1, row2);
        Ok(())
    }

    /// Replaces `row` by `coefficient * row`
    pub fn multiply_coefficient_and_row(
        &mut self,
        coefficient: &Bound<'_, PyAny>,
        row: usize,
    ) -> PyResult<()> {
        self.check_row(row)?;
        let c = crate::coefficient(coefficient)?;
        self.inner.scale_row(c, row).map_err(py_err)
    }

    /// Adds `coefficient * row_to_add` to `row_to_be_added_to`
    pub fn add_multiple_times_row_to_row(
        &mut self,
        coefficient: &Bound<'_, PyAny>,
        row_to_add: usize,
        row_to_be_added_to: usize,
    ) -> PyResult<()> {
        self.check_row(row_to_add)?;
        self.check_row(row_to_be_added_to)?;
        let c = crate::coefficient(coefficient)?;
        self.inner
            .add_scaled_row(c, row_to_add, row_to_be_added_to)
            .map_err(py_err)
    }

    /// For each row, the column of its first nonzero coefficient, or `None`
    pub fn pivot_indices(&self) -> Vec<Option<usize>> {
        self.inner.pivot_indices()
    }

    /// Returns a triangular form of the system, leaving this one unchanged
    pub fn compute_triangular_form(&self) -> PyResult<Self> {
        let inner = self.inner.compute_triangular_form().map_err(py_err)?;
        Ok(PyLinearSystem { inner })
    }

    /// Returns the reduced row-echelon form of the system, leaving this one unchanged
    pub fn compute_rref(&self) -> PyResult<Self> {
        let inner = self.inner.compute_rref().map_err(py_err)?;
        Ok(PyLinearSystem { inner })
    }

    /// Returns the parametrized solution set, or `None` if the system has no solutions
    pub fn compute_solution(&self) -> PyResult<Option<PyParametrization>> {
        Ok(match self.inner.compute_solution().map_err(py_err)? {
            Solution::Unique(p) | Solution::Infinite(p) => Some(p.into()),
            Solution::NoSolution => None,
        })
    }

    /// The number of independent equations
    pub fn rank(&self) -> PyResult<usize> {
        self.inner.rank().map_err(py_err)
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __getitem__(&self, row: usize) -> PyResult<PyHyperplane> {
        self.check_row(row)?;
        Ok(self.inner[row].clone().into())
    }

    pub fn __setitem__(&mut self, row: usize, value: PyHyperplane) -> PyResult<()> {
        self.check_row(row)?;
        self.inner.set_row(row, value.inner).map_err(py_err)
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "LinearSystem(equations={}, dimension={})",
            self.inner.len(),
            self.inner.dimension()
        )
    }

    pub fn __eq__(&self, other: &PyLinearSystem) -> bool {
        self.inner == other.inner
    }

    /// Returns a copy of the system
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl From<LinearSystem> for PyLinearSystem {
    fn from(inner: LinearSystem) -> Self {
        PyLinearSystem { inner }
    }
}
