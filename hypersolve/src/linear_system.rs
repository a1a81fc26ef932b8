use crate::coefficient::{checked_quotient, Coefficient, Decimal, Tolerance};
use crate::error::{Error, Result};
use crate::hyperplane::Hyperplane;
use crate::parametrization::Parametrization;
use crate::vector::Vector;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::{
    fmt,
    ops::{Index, RangeInclusive},
};
use tracing::{debug, trace};

/// An ordered list of equations sharing one dimension
///
/// Row order is the equation index and can be changed with [`LinearSystem::swap_rows`]. The
/// reduction methods ([`LinearSystem::compute_triangular_form`], [`LinearSystem::compute_rref`]
/// and [`LinearSystem::compute_solution`]) work on a copy and never modify `self`.
///
/// Coefficients are 96-bit decimals. An elimination step whose result would leave that range
/// fails with [`Error::Overflow`] instead of rounding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LinearSystem {
    /// the equations, one per row
    rows: Vec<Hyperplane>,

    /// the number of variables, i.e. the dimension of every row
    dimension: usize,

    /// the threshold below which a coefficient is treated as zero
    tolerance: Tolerance,
}

/// Elementary row operations
///
/// The elimination routines are written against this trait so that a proxy can be driven with
/// exactly the same operations as the system being reduced. Swapping cannot fail; the
/// arithmetic operations report [`Error::Overflow`].
pub trait RowOps {
    fn swap_rows(&mut self, row1: usize, row2: usize);
    fn scale_row(&mut self, coefficient: Coefficient, row: usize) -> Result<()>;
    fn add_scaled_row(&mut self, coefficient: Coefficient, from: usize, to: usize) -> Result<()>;
}

/// A recorded elementary row operation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RowOp {
    /// exchange two rows
    Swap(usize, usize),

    /// multiply a row by a coefficient
    Scale { coefficient: Coefficient, row: usize },

    /// add `coefficient` times row `from` to row `to`
    AddScaled {
        coefficient: Coefficient,
        from: usize,
        to: usize,
    },
}

impl RowOp {
    /// Performs this operation on `target`
    pub fn apply(&self, target: &mut impl RowOps) -> Result<()> {
        match *self {
            RowOp::Swap(row1, row2) => {
                target.swap_rows(row1, row2);
                Ok(())
            }
            RowOp::Scale { coefficient, row } => target.scale_row(coefficient, row),
            RowOp::AddScaled {
                coefficient,
                from,
                to,
            } => target.add_scaled_row(coefficient, from, to),
        }
    }
}

/// The outcome of solving a linear system
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Solution {
    /// exactly one point satisfies every equation
    Unique(Parametrization),

    /// the solutions form an affine space with at least one free variable
    Infinite(Parametrization),

    /// some equation reduces to `0 = k` with `k` nonzero
    NoSolution,
}

impl Solution {
    #[inline]
    pub fn is_solvable(&self) -> bool {
        !matches!(self, Solution::NoSolution)
    }

    /// The parametrization of the solution set, if there is one
    #[inline]
    pub fn parametrization(&self) -> Option<&Parametrization> {
        match self {
            Solution::Unique(p) | Solution::Infinite(p) => Some(p),
            Solution::NoSolution => None,
        }
    }

    #[inline]
    pub fn into_parametrization(self) -> Option<Parametrization> {
        match self {
            Solution::Unique(p) | Solution::Infinite(p) => Some(p),
            Solution::NoSolution => None,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Unique(p) | Solution::Infinite(p) => write!(f, "{}", p),
            Solution::NoSolution => write!(f, "No solutions"),
        }
    }
}

impl LinearSystem {
    /// Builds a system from its equations
    ///
    /// # Errors
    ///
    /// [`Error::EmptySystem`] if `rows` is empty and [`Error::DimensionMismatch`] if some row has a
    /// different dimension from the first one.
    pub fn new(rows: Vec<Hyperplane>) -> Result<Self> {
        let dimension = rows.first().ok_or(Error::EmptySystem)?.dimension();
        if let Some(row) = rows.iter().find(|row| row.dimension() != dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                found: row.dimension(),
            });
        }

        Ok(LinearSystem {
            rows,
            dimension,
            tolerance: Tolerance::default(),
        })
    }

    /// Replaces the zero tolerance used by pivot search and solution extraction
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// In-place version of [`LinearSystem::with_tolerance`]
    #[inline]
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    /// Builds a random system whose coefficients and constant terms are integers drawn from `range`
    ///
    /// # Panics
    ///
    /// Panics if `rows` is zero.
    pub fn random(
        rng: &mut impl Rng,
        rows: usize,
        dimension: usize,
        range: RangeInclusive<i64>,
    ) -> Self {
        assert!(rows > 0, "A linear system needs at least one row");
        let rows = (0..rows)
            .map(|_| {
                let normal_vector = Vector::random(rng, dimension, range.clone());
                let constant_term = Decimal::from(rng.random_range(range.clone()));
                Hyperplane::new(normal_vector, constant_term)
            })
            .collect();
        LinearSystem {
            rows,
            dimension,
            tolerance: Tolerance::default(),
        }
    }

    #[inline]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// The number of variables
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The number of equations
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a system built with [`LinearSystem::new`]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> &[Hyperplane] {
        &self.rows
    }

    #[inline]
    pub fn into_rows(self) -> Vec<Hyperplane> {
        self.rows
    }

    /// Replaces the equation at index `i`
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `row` does not live in the dimension of the system. The
    /// system is left unchanged in that case.
    pub fn set_row(&mut self, i: usize, row: Hyperplane) -> Result<()> {
        if row.dimension() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                found: row.dimension(),
            });
        }
        self.rows[i] = row;
        Ok(())
    }

    /// Exchanges two rows. Swapping a row with itself does nothing.
    #[inline]
    pub fn swap_rows(&mut self, row1: usize, row2: usize) {
        self.rows.swap(row1, row2);
    }

    /// Replaces `row` by `coefficient * row`
    ///
    /// Scaling by zero is allowed but destroys the equation; elimination never does it.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if a coefficient of the new row leaves the decimal range. The system is
    /// left unchanged in that case.
    #[inline]
    pub fn scale_row(&mut self, coefficient: Coefficient, row: usize) -> Result<()> {
        self.rows[row] = self.rows[row].times_scalar(coefficient)?;
        Ok(())
    }

    /// Replaces row `to` by `row[to] + coefficient * row[from]`
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] as for [`LinearSystem::scale_row`], again leaving the system unchanged.
    #[inline]
    pub fn add_scaled_row(
        &mut self,
        coefficient: Coefficient,
        from: usize,
        to: usize,
    ) -> Result<()> {
        self.rows[to] = self.rows[from]
            .times_scalar(coefficient)?
            .plus(&self.rows[to])?;
        Ok(())
    }

    /// For each row, the column of its first coefficient that is not near zero, or `None` if the
    /// whole normal vector is near zero
    pub fn pivot_indices(&self) -> Vec<Option<usize>> {
        self.rows
            .iter()
            .map(|row| row.first_nonzero_index(self.tolerance))
            .collect()
    }

    /// Brings the system into triangular form, mirroring every row operation on `proxy` and
    /// returning the pivot columns in row order
    ///
    /// Rows are consumed top to bottom while a column cursor moves left to right. For each column,
    /// a row whose pivot sits in that column is swapped up to the current row and the column is
    /// cleared below it. Columns with no such row are skipped without consuming a row, so the
    /// pivot rows end up contiguous at the top with strictly increasing pivot columns, and rows
    /// that reduce to `0 = k` collect at the bottom.
    ///
    /// Every entry below a pivot that is not exactly zero is cleared, including entries under the
    /// tolerance.
    fn echelon_helper(&mut self, proxy: &mut impl RowOps) -> Result<Vec<usize>> {
        let mut row = 0;
        let mut pcol = 0;
        let mut pcols = vec![];
        while row < self.len() && pcol < self.dimension {
            // leading coefficients change with every elimination, so look them up afresh
            let pivots = self.pivot_indices();
            let next_row = (row..self.len()).find(|&i| pivots[i] == Some(pcol));

            let Some(row1) = next_row else {
                pcol += 1;
                continue;
            };

            if row != row1 {
                trace!(row, row1, pcol, "swapping pivot row into place");
                self.swap_rows(row, row1);
                proxy.swap_rows(row, row1);
            }

            let c1 = self.rows[row].normal_vector()[pcol];
            for i in (row + 1)..self.len() {
                let c2 = self.rows[i].normal_vector()[pcol];
                if c2.is_zero() {
                    continue;
                }
                let coefficient = checked_quotient(-c2, c1)?;
                trace!(from = row, to = i, %coefficient, "eliminating below pivot");
                self.add_scaled_row(coefficient, row, i)?;
                proxy.add_scaled_row(coefficient, row, i)?;
            }

            pcols.push(pcol);
            row += 1;
            pcol += 1;
        }

        Ok(pcols)
    }

    /// Scales every pivot to 1 and clears the entries above it, working from the last row up
    fn back_substitute_helper(&mut self, proxy: &mut impl RowOps) -> Result<()> {
        for row in (0..self.len()).rev() {
            let Some(pcol) = self.rows[row].first_nonzero_index(self.tolerance) else {
                continue;
            };

            let coefficient = checked_quotient(Decimal::ONE, self.rows[row].normal_vector()[pcol])?;
            trace!(row, pcol, %coefficient, "normalizing pivot");
            self.scale_row(coefficient, row)?;
            proxy.scale_row(coefficient, row)?;

            let c1 = self.rows[row].normal_vector()[pcol];
            for i in 0..row {
                let c2 = self.rows[i].normal_vector()[pcol];
                if c2.is_zero() {
                    continue;
                }
                let coefficient = checked_quotient(-c2, c1)?;
                self.add_scaled_row(coefficient, row, i)?;
                proxy.add_scaled_row(coefficient, row, i)?;
            }
        }
        Ok(())
    }

    /// Returns a triangular form of the system
    ///
    /// Each row with a pivot has it strictly to the right of the pivot of the row above, and rows
    /// whose normal vector vanishes come last. Redundant equations stay in the system as zero rows.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if an elimination step leaves the decimal range.
    pub fn compute_triangular_form(&self) -> Result<LinearSystem> {
        let mut system = self.clone();
        system.echelon_helper(&mut ())?;
        Ok(system)
    }

    /// Returns the reduced row-echelon form of the system
    ///
    /// Every pivot is 1 and is the only nonzero entry of its column.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if an elimination step leaves the decimal range.
    #[inline]
    pub fn compute_rref(&self) -> Result<LinearSystem> {
        self.compute_rref_with(&mut ())
    }

    /// Same as [`LinearSystem::compute_rref`], additionally replaying each row operation on `proxy`
    ///
    /// Passing a `Vec<RowOp>` records the full elimination. On error, `proxy` has seen every
    /// operation up to the failing one.
    pub fn compute_rref_with(&self, proxy: &mut impl RowOps) -> Result<LinearSystem> {
        let mut system = self.clone();
        system.echelon_helper(proxy)?;
        system.back_substitute_helper(proxy)?;
        Ok(system)
    }

    /// The number of independent equations
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if an elimination step leaves the decimal range.
    #[inline]
    pub fn rank(&self) -> Result<usize> {
        Ok(self.clone().echelon_helper(&mut ())?.len())
    }

    /// Solves the system
    ///
    /// Returns [`Solution::NoSolution`] if the equations are inconsistent. Otherwise the solution
    /// set is parametrized by one direction vector per free variable, in increasing column order,
    /// and is [`Solution::Unique`] when there are no free variables.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if an elimination step leaves the decimal range, e.g. when a large
    /// coefficient is divided by a tiny pivot.
    pub fn compute_solution(&self) -> Result<Solution> {
        let rref = self.compute_rref().inspect_err(|e| {
            debug!(error = %e, "elimination failed");
        })?;

        if let Some(i) = rref
            .rows
            .iter()
            .position(|row| row.is_contradiction(self.tolerance))
        {
            debug!(row = i, "contradictory equation in reduced form, no solutions");
            return Ok(Solution::NoSolution);
        }

        let pivots = rref.pivot_indices();
        let direction_vectors = rref.extract_direction_vectors(&pivots);
        let basepoint = rref.extract_basepoint(&pivots);
        let parametrization = Parametrization::from_parts(basepoint, direction_vectors);

        debug!(
            dimension = self.dimension,
            free_variables = parametrization.free_variables(),
            "solved linear system"
        );
        Ok(if parametrization.is_unique() {
            Solution::Unique(parametrization)
        } else {
            Solution::Infinite(parametrization)
        })
    }

    /// Columns that carry no pivot, in increasing order
    fn free_variable_indices(&self, pivots: &[Option<usize>]) -> Vec<usize> {
        let all: FxHashSet<usize> = (0..self.dimension).collect();
        let pivot_cols: FxHashSet<usize> = pivots.iter().flatten().copied().collect();
        let mut free: Vec<usize> = all.difference(&pivot_cols).copied().collect();
        free.sort_unstable();
        free
    }

    /// Reads off one direction vector per free variable from a system in reduced form
    ///
    /// Relies on the pivot rows being contiguous at the top, so the scan stops at the first row
    /// without a pivot.
    fn extract_direction_vectors(&self, pivots: &[Option<usize>]) -> Vec<Vector> {
        self.free_variable_indices(pivots)
            .into_iter()
            .map(|free_var| {
                let mut v = Vector::basis(self.dimension, free_var);
                for (row, pivot) in self.rows.iter().zip(pivots) {
                    let Some(pcol) = *pivot else { break };
                    v[pcol] = -row.normal_vector()[free_var];
                }
                v
            })
            .collect()
    }

    /// The solution obtained by setting every free variable to zero
    fn extract_basepoint(&self, pivots: &[Option<usize>]) -> Vector {
        let mut basepoint = Vector::zeros(self.dimension);
        for (row, pivot) in self.rows.iter().zip(pivots) {
            let Some(pcol) = *pivot else { break };
            basepoint[pcol] = row.constant_term();
        }
        basepoint
    }

    /// Row-wise comparison within the tolerance of `self`
    pub fn approx_eq(&self, rhs: &LinearSystem) -> bool {
        self.len() == rhs.len()
            && self
                .rows
                .iter()
                .zip(rhs.rows.iter())
                .all(|(a, b)| a.approx_eq(b, self.tolerance))
    }
}

impl RowOps for () {
    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}

    #[inline]
    fn scale_row(&mut self, _: Coefficient, _: usize) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn add_scaled_row(&mut self, _: Coefficient, _: usize, _: usize) -> Result<()> {
        Ok(())
    }
}

impl RowOps for Vec<RowOp> {
    #[inline]
    fn swap_rows(&mut self, row1: usize, row2: usize) {
        self.push(RowOp::Swap(row1, row2));
    }

    #[inline]
    fn scale_row(&mut self, coefficient: Coefficient, row: usize) -> Result<()> {
        self.push(RowOp::Scale { coefficient, row });
        Ok(())
    }

    #[inline]
    fn add_scaled_row(&mut self, coefficient: Coefficient, from: usize, to: usize) -> Result<()> {
        self.push(RowOp::AddScaled {
            coefficient,
            from,
            to,
        });
        Ok(())
    }
}

impl RowOps for LinearSystem {
    #[inline]
    fn swap_rows(&mut self, row1: usize, row2: usize) {
        LinearSystem::swap_rows(self, row1, row2);
    }

    #[inline]
    fn scale_row(&mut self, coefficient: Coefficient, row: usize) -> Result<()> {
        LinearSystem::scale_row(self, coefficient, row)
    }

    #[inline]
    fn add_scaled_row(&mut self, coefficient: Coefficient, from: usize, to: usize) -> Result<()> {
        LinearSystem::add_scaled_row(self, coefficient, from, to)
    }
}

impl Index<usize> for LinearSystem {
    type Output = Hyperplane;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Linear System:")?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "\nEquation {}: {}", i + 1, row)?;
        }
        Ok(())
    }
}
