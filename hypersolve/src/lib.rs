//! `hypersolve` is a Rust library for solving systems of linear equations with arbitrary-precision
//! decimal coefficients. Some features include:
//! - elementary row operations (swap, scale, add a multiple of one row to another)
//! - triangular form and reduced row-echelon form by Gaussian elimination
//! - classification of the solution set as a unique point, an affine space, or empty
//! - a parametrization `basepoint + Σ tᵢ · directionᵢ` of every non-empty solution set
//! - recording of the row operations performed during elimination
//!
//! The main data structures provided by this crate are:
//! - [`Vector`]: a vector of [`Coefficient`]s, dereferencing to a borrowed [`VectorSlice`]
//! - [`Hyperplane`]: one equation `normal_vector · x = constant_term`
//! - [`LinearSystem`]: an ordered list of equations of the same dimension
//! - [`Parametrization`]: the solution set returned inside a [`Solution`]
//!
//! # Examples
//!
//! ```
//! use hypersolve::{Hyperplane, LinearSystem, Solution};
//!
//! let system = LinearSystem::new(vec![
//!     Hyperplane::from_strs(&["1", "1", "1"], "1").unwrap(),
//!     Hyperplane::from_strs(&["0", "1", "1"], "2").unwrap(),
//! ])
//! .unwrap();
//!
//! match system.compute_solution().unwrap() {
//!     Solution::Infinite(p) => assert_eq!(p.free_variables(), 1),
//!     other => panic!("unexpected solution {}", other),
//! }
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod coefficient;
pub mod error;
pub mod hyperplane;
pub mod linear_system;
pub mod parametrization;
pub mod vector;

#[cfg(test)]
mod proptests;

pub use coefficient::{Coefficient, Decimal, Tolerance};
pub use error::{Error, Result};
pub use hyperplane::Hyperplane;
pub use linear_system::{LinearSystem, RowOp, RowOps, Solution};
pub use parametrization::Parametrization;
pub use vector::{Vector, VectorSlice};
