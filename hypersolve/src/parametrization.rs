use crate::coefficient::{Coefficient, Tolerance};
use crate::error::{Error, Result};
use crate::vector::{Vector, VectorSlice};
use std::fmt;

/// An affine solution set `{ basepoint + Σ tᵢ · direction_vectors[i] }`
///
/// A parametrization with no direction vectors describes a single point.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Parametrization {
    basepoint: Vector,
    direction_vectors: Vec<Vector>,
}

impl Parametrization {
    /// Builds a parametrization, checking that every direction vector lives in the same dimension
    /// as the basepoint
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] for the first direction vector whose dimension differs.
    pub fn new(basepoint: Vector, direction_vectors: Vec<Vector>) -> Result<Self> {
        let dimension = basepoint.dimension();
        if let Some(v) = direction_vectors
            .iter()
            .find(|v| v.dimension() != dimension)
        {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                found: v.dimension(),
            });
        }

        Ok(Parametrization {
            basepoint,
            direction_vectors,
        })
    }

    /// Builds a parametrization from vectors already known to share a dimension
    pub(crate) fn from_parts(basepoint: Vector, direction_vectors: Vec<Vector>) -> Self {
        debug_assert!(direction_vectors
            .iter()
            .all(|v| v.dimension() == basepoint.dimension()));
        Parametrization {
            basepoint,
            direction_vectors,
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.basepoint.dimension()
    }

    #[inline]
    pub fn basepoint(&self) -> &VectorSlice {
        &self.basepoint
    }

    #[inline]
    pub fn direction_vectors(&self) -> &[Vector] {
        &self.direction_vectors
    }

    /// The number of free parameters `tᵢ`
    #[inline]
    pub fn free_variables(&self) -> usize {
        self.direction_vectors.len()
    }

    /// Returns true if the solution set is a single point
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.direction_vectors.is_empty()
    }

    /// Evaluates `basepoint + Σ tᵢ · direction_vectors[i]`
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `params` does not hold one value per direction vector and
    /// [`Error::Overflow`] if a coordinate of the point leaves the decimal range.
    pub fn point_at(&self, params: &[Coefficient]) -> Result<Vector> {
        if params.len() != self.free_variables() {
            return Err(Error::DimensionMismatch {
                expected: self.free_variables(),
                found: params.len(),
            });
        }

        let mut point = self.basepoint.clone();
        for (&t, d) in params.iter().zip(self.direction_vectors.iter()) {
            point.add_scaled(t, d)?;
        }
        Ok(point)
    }

    /// Compares basepoints and direction vectors coordinate-wise within `tol`
    pub fn approx_eq(&self, rhs: &Parametrization, tol: Tolerance) -> bool {
        self.basepoint.approx_eq(&rhs.basepoint, tol)
            && self.free_variables() == rhs.free_variables()
            && self
                .direction_vectors
                .iter()
                .zip(rhs.direction_vectors.iter())
                .all(|(a, b)| a.approx_eq(b, tol))
    }
}

/// One line per coordinate, e.g. `x_1 = -1.346 + -1 t_1`, rounded to three decimal places
impl fmt::Display for Parametrization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for coord in 0..self.dimension() {
            write!(
                f,
                "x_{} = {}",
                coord + 1,
                self.basepoint[coord].round_dp(3).normalize()
            )?;
            for (free_var, v) in self.direction_vectors.iter().enumerate() {
                write!(
                    f,
                    " + {} t_{}",
                    v[coord].round_dp(3).normalize(),
                    free_var + 1
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
