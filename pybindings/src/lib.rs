// pyo3's generated wrappers for methods returning `PyResult<T>` trip this lint
#![allow(clippy::useless_conversion)]

pub mod hyperplane;
pub mod linear_system;
pub mod parametrization;

use crate::hyperplane::PyHyperplane;
use crate::linear_system::PyLinearSystem;
use crate::parametrization::PyParametrization;
use pyo3::exceptions::{PyOverflowError, PyValueError};
use pyo3::prelude::*;

use ::hypersolve::coefficient::{parse_coefficient, Coefficient};

/// Reads a Python value as a decimal coefficient via its string form, so `"0.786"`, `0.786` and
/// `decimal.Decimal("0.786")` all give the same coefficient
pub(crate) fn coefficient(value: &Bound<'_, PyAny>) -> PyResult<Coefficient> {
    let s = value.str()?;
    parse_coefficient(&s.to_cow()?).map_err(py_err)
}

pub(crate) fn coefficient_to_string(c: Coefficient) -> String {
    c.normalize().to_string()
}

/// Decimal range overflow becomes `OverflowError`, every other failure `ValueError`
pub(crate) fn py_err(e: ::hypersolve::Error) -> PyErr {
    match e {
        ::hypersolve::Error::Overflow => PyOverflowError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

#[pymodule]
fn hypersolve(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHyperplane>()?;
    m.add_class::<PyLinearSystem>()?;
    m.add_class::<PyParametrization>()?;
    Ok(())
}
