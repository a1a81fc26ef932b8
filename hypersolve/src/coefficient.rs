//! Scalar coefficients and the tolerance used to decide when a coefficient counts as zero.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub use rust_decimal::Decimal;

/// A coefficient of a linear equation. This is an alias for [`Decimal`]
///
/// All arithmetic keeps 28 significant digits, so rounding error from many elimination steps stays
/// far below the default [`Tolerance`] of `1e-10`.
pub type Coefficient = Decimal;

/// An absolute tolerance for treating coefficients as zero
///
/// Decimal division rounds, so quantities that are mathematically zero after elimination can be
/// left with a tiny residue. Every zero test in the crate goes through [`Tolerance::is_near_zero`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tolerance(Coefficient);

impl Tolerance {
    /// Decimal places of the default epsilon, i.e. the default is `1e-10`
    pub const DEFAULT_SCALE: u32 = 10;

    /// Creates a tolerance from an epsilon. Negative values are replaced by their magnitude.
    pub fn new(epsilon: Coefficient) -> Self {
        Tolerance(epsilon.abs())
    }

    #[inline]
    pub fn epsilon(&self) -> Coefficient {
        self.0
    }

    /// Returns true if `|c| < epsilon`
    #[inline]
    pub fn is_near_zero(&self, c: Coefficient) -> bool {
        c.abs() < self.0
    }

    /// Returns true if `a` and `b` differ by less than epsilon
    ///
    /// A difference too large to represent is never near zero.
    #[inline]
    pub fn approx_eq(&self, a: Coefficient, b: Coefficient) -> bool {
        a.checked_sub(b).is_some_and(|d| self.is_near_zero(d))
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance(Decimal::new(1, Self::DEFAULT_SCALE))
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `a + b`, or [`Error::Overflow`] if the sum leaves the range of [`Decimal`]
#[inline]
pub fn checked_sum(a: Coefficient, b: Coefficient) -> Result<Coefficient> {
    a.checked_add(b).ok_or(Error::Overflow)
}

/// `a * b`, or [`Error::Overflow`] if the product leaves the range of [`Decimal`]
#[inline]
pub fn checked_product(a: Coefficient, b: Coefficient) -> Result<Coefficient> {
    a.checked_mul(b).ok_or(Error::Overflow)
}

/// `a / b`, or [`Error::Overflow`] if the quotient leaves the range of [`Decimal`] or `b` is zero
#[inline]
pub fn checked_quotient(a: Coefficient, b: Coefficient) -> Result<Coefficient> {
    a.checked_div(b).ok_or(Error::Overflow)
}

/// Parses a decimal literal such as `"-10.366"` into a [`Coefficient`]
pub fn parse_coefficient(s: &str) -> Result<Coefficient> {
    Ok(Decimal::from_str(s.trim())?)
}

/// Converts an `f64` to the closest short decimal, e.g. `0.786` becomes exactly `0.786`
pub fn coefficient_from_f64(x: f64) -> Result<Coefficient> {
    Ok(Decimal::try_from(x)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_epsilon() {
        assert_eq!(Tolerance::default().epsilon(), Decimal::new(1, 10));
    }

    #[test]
    fn near_zero() {
        let tol = Tolerance::default();
        assert!(tol.is_near_zero(Decimal::ZERO));
        assert!(tol.is_near_zero(Decimal::new(-9, 11)));
        assert!(!tol.is_near_zero(Decimal::new(1, 10)));
        assert!(!tol.is_near_zero(Decimal::new(-2, 3)));

        let loose = Tolerance::new(Decimal::new(-1, 3));
        assert_eq!(loose.epsilon(), Decimal::new(1, 3));
        assert!(loose.approx_eq(Decimal::new(1346, 3), Decimal::new(13459, 4)));
        assert!(!loose.approx_eq(Decimal::new(1346, 3), Decimal::new(1348, 3)));
    }

    #[test]
    fn rounding_residue_is_near_zero() {
        // 1/3 * 3 rounds to 0.999..., which must still compare as 1
        let third = Decimal::ONE / Decimal::from(3);
        let residue = third * Decimal::from(3) - Decimal::ONE;
        assert_ne!(residue, Decimal::ZERO);
        assert!(Tolerance::default().is_near_zero(residue));
    }

    #[test]
    fn checked_arithmetic() {
        let big = Decimal::MAX;
        assert_eq!(checked_sum(Decimal::ONE, Decimal::TWO), Ok(Decimal::from(3)));
        assert_eq!(checked_sum(big, Decimal::ONE), Err(Error::Overflow));
        assert_eq!(checked_product(big, Decimal::TWO), Err(Error::Overflow));
        assert_eq!(
            checked_quotient(Decimal::from(1_000_000), Decimal::new(1, 25)),
            Err(Error::Overflow)
        );
        assert_eq!(checked_quotient(Decimal::ONE, Decimal::ZERO), Err(Error::Overflow));
        assert_eq!(
            checked_quotient(Decimal::ONE, Decimal::from(4)),
            Ok(Decimal::new(25, 2))
        );

        // a difference past the decimal range is not a small one
        assert!(!Tolerance::default().approx_eq(big, -big));
    }

    #[test]
    fn parsing() {
        assert_eq!(parse_coefficient("-10.366").unwrap(), Decimal::new(-10366, 3));
        assert_eq!(parse_coefficient(" 2 ").unwrap(), Decimal::from(2));
        assert!(parse_coefficient("ten").is_err());
        assert_eq!(coefficient_from_f64(0.786).unwrap(), Decimal::new(786, 3));
        assert!(coefficient_from_f64(f64::NAN).is_err());
    }
}
