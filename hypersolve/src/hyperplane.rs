use crate::coefficient::{
    checked_product, checked_sum, parse_coefficient, Coefficient, Decimal, Tolerance,
};
use crate::error::Result;
use crate::vector::{Vector, VectorSlice};
use std::fmt;

/// A single linear equation `normal_vector · x = constant_term`
///
/// Geometrically this is a hyperplane in `dimension()`-dimensional space. Rows are immutable;
/// [`Hyperplane::times_scalar`] and [`Hyperplane::plus`] return new rows.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Hyperplane {
    normal_vector: Vector,
    constant_term: Coefficient,
}

impl Hyperplane {
    pub fn new(normal_vector: Vector, constant_term: Coefficient) -> Self {
        Hyperplane {
            normal_vector,
            constant_term,
        }
    }

    /// The trivial equation `0 = 0` in the given dimension
    pub fn zero(dimension: usize) -> Self {
        Self::new(Vector::zeros(dimension), Decimal::ZERO)
    }

    /// Parses the coefficients and constant term from decimal literals
    pub fn from_strs(normal_vector: &[&str], constant_term: &str) -> Result<Self> {
        Ok(Self::new(
            Vector::from_strs(normal_vector)?,
            parse_coefficient(constant_term)?,
        ))
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.normal_vector.dimension()
    }

    #[inline]
    pub fn normal_vector(&self) -> &VectorSlice {
        &self.normal_vector
    }

    #[inline]
    pub fn constant_term(&self) -> Coefficient {
        self.constant_term
    }

    /// The column of the first coefficient that is not near zero, or `None` for a row whose
    /// normal vector vanishes
    #[inline]
    pub fn first_nonzero_index(&self, tol: Tolerance) -> Option<usize> {
        self.normal_vector.first_nonzero_index(tol)
    }

    /// Returns the row `c * self`
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`](crate::Error::Overflow) if a coefficient of the result leaves the range
    /// of [`Decimal`].
    pub fn times_scalar(&self, c: Coefficient) -> Result<Self> {
        Ok(Self::new(
            self.normal_vector.times_scalar(c)?,
            checked_product(self.constant_term, c)?,
        ))
    }

    /// Returns the row `self + rhs`
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`](crate::Error::Overflow) as for [`Hyperplane::times_scalar`].
    pub fn plus(&self, rhs: &Hyperplane) -> Result<Self> {
        Ok(Self::new(
            self.normal_vector.plus(&rhs.normal_vector)?,
            checked_sum(self.constant_term, rhs.constant_term)?,
        ))
    }

    /// Returns true if `point` lies on the hyperplane, up to `tol`
    ///
    /// A point whose dot product with the normal vector overflows lies on no hyperplane.
    pub fn is_satisfied_by(&self, point: &VectorSlice, tol: Tolerance) -> bool {
        self.normal_vector
            .dot(point)
            .is_ok_and(|lhs| tol.approx_eq(lhs, self.constant_term))
    }

    /// Coefficient-wise comparison within `tol`
    pub fn approx_eq(&self, rhs: &Hyperplane, tol: Tolerance) -> bool {
        self.normal_vector.approx_eq(&rhs.normal_vector, tol)
            && tol.approx_eq(self.constant_term, rhs.constant_term)
    }

    /// A contradictory row reads `0 = k` for some nonzero `k`
    pub fn is_contradiction(&self, tol: Tolerance) -> bool {
        self.normal_vector.is_zero(tol) && !tol.is_near_zero(self.constant_term)
    }
}

/// Formats the equation like `1x_1 - 2.5x_2 + 3x_3 = 4`, rounding to three decimal places and
/// omitting zero terms
impl fmt::Display for Hyperplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_term = false;
        for (i, c) in self.normal_vector.iter().enumerate() {
            let c = c.round_dp(3);
            if c.is_zero() {
                continue;
            }
            if wrote_term {
                write!(f, " {} ", if c.is_sign_negative() { '-' } else { '+' })?;
            } else if c.is_sign_negative() {
                write!(f, "-")?;
            }
            write!(f, "{}x_{}", c.abs().normalize(), i + 1)?;
            wrote_term = true;
        }
        if !wrote_term {
            write!(f, "0")?;
        }
        write!(f, " = {}", self.constant_term.round_dp(3).normalize())
    }
}
