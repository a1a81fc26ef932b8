use crate::coefficient::{
    checked_product, checked_sum, coefficient_from_f64, parse_coefficient, Coefficient, Decimal,
    Tolerance,
};
use crate::error::{Error, Result};
use rand::Rng;
use ref_cast::RefCast;
use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut, Range, RangeInclusive};

/// A vector of decimal coefficients
///
/// `Vector` owns its coordinates. Read-only and in-place operations live on [`VectorSlice`], which
/// `Vector` dereferences to, so they are also available on borrowed rows of a system.
///
/// # Examples
///
/// ```
/// use hypersolve::vector::Vector;
///
/// let v = Vector::from_strs(&["1", "-2.5", "0"]).unwrap();
/// let w = v.times_scalar(2.into()).unwrap();
/// assert_eq!(w, Vector::from_strs(&["2", "-5", "0"]).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Vector(Vec<Coefficient>);

/// A borrowed run of coordinates, represented as a slice of [`Coefficient`]s
#[derive(RefCast, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct VectorSlice([Coefficient]);

impl VectorSlice {
    /// Returns a copy of the coordinates as a [`Vector`]
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.0.to_vec().into()
    }

    /// The number of coordinates
    #[inline]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Coefficient> {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Coefficient] {
        &self.0
    }

    /// Computes the dot product of two slices
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if a partial sum leaves the range of [`Decimal`].
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn dot(&self, rhs: &VectorSlice) -> Result<Coefficient> {
        assert_eq!(
            self.dimension(),
            rhs.dimension(),
            "Vectors must have the same dimension for a dot product"
        );
        self.0
            .iter()
            .zip(rhs.0.iter())
            .try_fold(Decimal::ZERO, |acc, (&a, &b)| {
                checked_sum(acc, checked_product(a, b)?)
            })
    }

    /// Returns the index of the first coordinate that is not near zero
    ///
    /// # Returns
    ///
    /// `Some(index)` if such a coordinate exists, otherwise `None`.
    pub fn first_nonzero_index(&self, tol: Tolerance) -> Option<usize> {
        self.0.iter().position(|&c| !tol.is_near_zero(c))
    }

    /// Returns true if every coordinate is near zero
    #[inline]
    pub fn is_zero(&self, tol: Tolerance) -> bool {
        self.first_nonzero_index(tol).is_none()
    }

    /// Coordinate-wise comparison within `tol`. Slices of different dimension are never equal.
    pub fn approx_eq(&self, rhs: &VectorSlice, tol: Tolerance) -> bool {
        self.dimension() == rhs.dimension()
            && self
                .0
                .iter()
                .zip(rhs.0.iter())
                .all(|(&a, &b)| tol.approx_eq(a, b))
    }

    /// Multiplies every coordinate by `c` in place
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if a product leaves the range of [`Decimal`]. Coordinates before the
    /// failing one have already been scaled.
    pub fn scale(&mut self, c: Coefficient) -> Result<()> {
        for x in self.0.iter_mut() {
            *x = checked_product(*x, c)?;
        }
        Ok(())
    }

    /// Adds `c * source` to this slice in place
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] as for [`VectorSlice::scale`], with the same partial update.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn add_scaled(&mut self, c: Coefficient, source: &VectorSlice) -> Result<()> {
        assert_eq!(
            self.dimension(),
            source.dimension(),
            "Vectors must have the same dimension to be added"
        );
        for (x, &y) in self.0.iter_mut().zip(source.0.iter()) {
            *x = checked_sum(*x, checked_product(c, y)?)?;
        }
        Ok(())
    }

    /// Returns `self + rhs` as a new [`Vector`]
    pub fn plus(&self, rhs: &VectorSlice) -> Result<Vector> {
        let mut v = self.to_vector();
        v.add_scaled(Decimal::ONE, rhs)?;
        Ok(v)
    }

    /// Returns `self - rhs` as a new [`Vector`]
    pub fn minus(&self, rhs: &VectorSlice) -> Result<Vector> {
        let mut v = self.to_vector();
        v.add_scaled(Decimal::NEGATIVE_ONE, rhs)?;
        Ok(v)
    }

    /// Returns `c * self` as a new [`Vector`]
    pub fn times_scalar(&self, c: Coefficient) -> Result<Vector> {
        let mut v = self.to_vector();
        v.scale(c)?;
        Ok(v)
    }

    /// Cross product of two vectors in dimension 3
    ///
    /// Vectors of dimension 2 are treated as lying in the `z = 0` plane, so the result always
    /// has dimension 3.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDimension`] if either vector has a dimension other than 2 or 3,
    /// [`Error::DimensionMismatch`] if the two dimensions differ and [`Error::Overflow`] if a
    /// coordinate leaves the range of [`Decimal`].
    pub fn cross(&self, rhs: &VectorSlice) -> Result<Vector> {
        for v in [self, rhs] {
            if !(2..=3).contains(&v.dimension()) {
                return Err(Error::UnsupportedDimension(v.dimension()));
            }
        }
        if self.dimension() != rhs.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.dimension(),
                found: rhs.dimension(),
            });
        }

        let coord = |v: &VectorSlice, i: usize| v.0.get(i).copied().unwrap_or(Decimal::ZERO);
        let (x1, y1, z1) = (coord(self, 0), coord(self, 1), coord(self, 2));
        let (x2, y2, z2) = (coord(rhs, 0), coord(rhs, 1), coord(rhs, 2));
        // a * d - b * c
        let minor = |a: Coefficient, d: Coefficient, b: Coefficient, c: Coefficient| -> Result<_> {
            checked_sum(checked_product(a, d)?, -checked_product(b, c)?)
        };
        Ok(Vector(vec![
            minor(y1, z2, y2, z1)?,
            -minor(x1, z2, x2, z1)?,
            minor(x1, y2, x2, y1)?,
        ]))
    }
}

impl Index<usize> for VectorSlice {
    type Output = Coefficient;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl IndexMut<usize> for VectorSlice {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.0.index_mut(index)
    }
}

impl Index<Range<usize>> for VectorSlice {
    type Output = VectorSlice;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        VectorSlice::ref_cast(&self.0[index])
    }
}

impl Vector {
    /// Creates a vector of `dimension` zeros
    #[inline]
    pub fn zeros(dimension: usize) -> Self {
        Vector(vec![Decimal::ZERO; dimension])
    }

    /// Creates the `i`-th standard basis vector of the given dimension
    pub fn basis(dimension: usize, i: usize) -> Self {
        let mut v = Self::zeros(dimension);
        v[i] = Decimal::ONE;
        v
    }

    /// Parses each string as a decimal coordinate
    pub fn from_strs(coordinates: &[&str]) -> Result<Self> {
        coordinates.iter().map(|s| parse_coefficient(s)).collect()
    }

    /// Converts each `f64` to its closest short decimal
    pub fn from_f64s(coordinates: &[f64]) -> Result<Self> {
        coordinates.iter().map(|&x| coefficient_from_f64(x)).collect()
    }

    /// Creates a vector whose coordinates are integers drawn uniformly from `range`
    #[inline]
    pub fn random(rng: &mut impl Rng, dimension: usize, range: RangeInclusive<i64>) -> Self {
        (0..dimension)
            .map(|_| Decimal::from(rng.random_range(range.clone())))
            .collect()
    }

    #[inline]
    pub fn as_vector_slice(&self) -> &VectorSlice {
        VectorSlice::ref_cast(&self.0)
    }

    #[inline]
    pub fn as_vector_slice_mut(&mut self) -> &mut VectorSlice {
        VectorSlice::ref_cast_mut(&mut self.0)
    }
}

/// Formats the vector like `Vector: (1, -2.5, 0)`
impl fmt::Display for VectorSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c.normalize())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_vector_slice(), f)
    }
}

impl From<Vec<Coefficient>> for Vector {
    fn from(value: Vec<Coefficient>) -> Self {
        Vector(value)
    }
}

impl From<Vector> for Vec<Coefficient> {
    fn from(value: Vector) -> Self {
        value.0
    }
}

impl FromIterator<Coefficient> for Vector {
    fn from_iter<T: IntoIterator<Item = Coefficient>>(iter: T) -> Self {
        Vec::from_iter(iter).into()
    }
}

impl Deref for Vector {
    type Target = VectorSlice;
    fn deref(&self) -> &Self::Target {
        self.as_vector_slice()
    }
}

impl DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_vector_slice_mut()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn v(coords: &[&str]) -> Vector {
        Vector::from_strs(coords).unwrap()
    }

    #[test]
    fn plus_minus_scale() {
        let a = v(&["8.218", "-9.341"]);
        let b = v(&["-1.129", "2.111"]);
        assert_eq!(a.plus(&b).unwrap(), v(&["7.089", "-7.230"]));

        let a = v(&["7.119", "8.215"]);
        let b = v(&["-8.223", "0.878"]);
        assert_eq!(a.minus(&b).unwrap(), v(&["15.342", "7.337"]));

        let a = v(&["1.671", "-1.012", "-0.318"]);
        assert_eq!(
            a.times_scalar(Decimal::new(7410, 3)).unwrap(),
            v(&["12.38211", "-7.49892", "-2.35638"])
        );
    }

    #[test]
    fn in_place_ops() {
        let mut a = v(&["1", "2", "3"]);
        a.scale(Decimal::from(-2)).unwrap();
        assert_eq!(a, v(&["-2", "-4", "-6"]));
        a.add_scaled(Decimal::from(2), &v(&["1", "2", "4"])).unwrap();
        assert_eq!(a, v(&["0", "0", "2"]));
        a[0] = Decimal::ONE;
        assert_eq!(a[0], Decimal::ONE);
    }

    #[test]
    fn dot_product() {
        let a = v(&["7.887", "4.138"]);
        let b = v(&["-8.802", "6.776"]);
        assert_eq!(a.dot(&b).unwrap(), Decimal::new(-41382286, 6));
    }

    #[test]
    fn arithmetic_past_decimal_range() {
        let huge = v(&["50000000000000000000000000000", "1"]);
        assert_eq!(huge.times_scalar(Decimal::TWO), Err(Error::Overflow));
        assert_eq!(huge.plus(&huge), Err(Error::Overflow));
        assert_eq!(huge.dot(&huge), Err(Error::Overflow));
        assert_eq!(
            huge.minus(&v(&["-50000000000000000000000000000", "0"])),
            Err(Error::Overflow)
        );
        assert_eq!(
            v(&["50000000000000000000000000000", "1", "0"]).cross(&v(&["0", "0", "2"])),
            Err(Error::Overflow)
        );
    }

    #[test]
    #[should_panic(expected = "same dimension")]
    fn dot_dimension_mismatch() {
        let _ = v(&["1", "2"]).dot(&v(&["1", "2", "3"]));
    }

    #[test]
    fn first_nonzero() {
        let tol = Tolerance::default();
        assert_eq!(v(&["0", "0.00000000001", "3"]).first_nonzero_index(tol), Some(2));
        assert_eq!(v(&["0", "-0.5", "3"]).first_nonzero_index(tol), Some(1));
        assert_eq!(v(&["0", "0"]).first_nonzero_index(tol), None);
        assert!(Vector::zeros(4).is_zero(tol));
        assert!(!Vector::basis(4, 3).is_zero(tol));
    }

    #[test]
    fn approx_eq() {
        let tol = Tolerance::new(Decimal::new(1, 3));
        assert!(v(&["-1.3459", "0"]).approx_eq(&v(&["-1.346", "0.0001"]), tol));
        assert!(!v(&["-1.3459", "0"]).approx_eq(&v(&["-1.346", "0.01"]), tol));
        assert!(!v(&["1"]).approx_eq(&v(&["1", "0"]), tol));
    }

    #[test]
    fn cross_product() {
        let a = v(&["8.462", "7.893", "-8.187"]);
        let b = v(&["6.984", "-5.975", "4.778"]);
        assert_eq!(
            a.cross(&b).unwrap(),
            v(&["-11.204571", "-97.609444", "-105.685162"])
        );

        let a = v(&["1", "0"]);
        let b = v(&["0", "1"]);
        assert_eq!(a.cross(&b).unwrap(), v(&["0", "0", "1"]));

        assert_eq!(
            v(&["1", "2", "3", "4"]).cross(&v(&["1", "2", "3", "4"])),
            Err(Error::UnsupportedDimension(4))
        );
        assert_eq!(
            v(&["1", "2"]).cross(&v(&["1", "2", "3"])),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(
            Vector::from_f64s(&[0.786, -0.131]).unwrap(),
            v(&["0.786", "-0.131"])
        );
        assert!(Vector::from_strs(&["1", "x"]).is_err());
        let raw: Vec<Coefficient> = v(&["1", "2"]).into();
        assert_eq!(raw, vec![Decimal::ONE, Decimal::TWO]);
        assert_eq!(v(&["1", "2", "3"])[1..3].to_vector(), v(&["2", "3"]));
    }

    #[test]
    fn random_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let r = Vector::random(&mut rng, 50, -3..=3);
        assert_eq!(r.dimension(), 50);
        assert!(r.iter().all(|c| c.abs() <= Decimal::from(3) && c.fract().is_zero()));
    }

    #[test]
    fn display() {
        assert_eq!(v(&["1.50", "-2", "0"]).to_string(), "Vector: (1.5, -2, 0)");
    }
}
