//! Property-based tests for elimination and solution extraction.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Decimal, Hyperplane, LinearSystem, Solution, Tolerance, Vector};

    // Integer coefficient matrices with up to 5 rows and 4 columns
    fn coefficients() -> impl Strategy<Value = Vec<Vec<i64>>> {
        (1usize..=5, 1usize..=4).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(-6i64..=6, cols), rows)
        })
    }

    // A coefficient matrix together with a point, used to build a consistent system
    fn matrix_and_point() -> impl Strategy<Value = (Vec<Vec<i64>>, Vec<i64>)> {
        (1usize..=5, 1usize..=4).prop_flat_map(|(rows, cols)| {
            (
                prop::collection::vec(prop::collection::vec(-6i64..=6, cols), rows),
                prop::collection::vec(-6i64..=6, cols),
            )
        })
    }

    #[derive(Clone, Debug)]
    enum Op {
        Swap(usize, usize),
        Scale(i64, usize),
        AddScaled(i64, usize, usize),
    }

    fn row_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..5, 0usize..5).prop_map(|(i, j)| Op::Swap(i, j)),
            (prop_oneof![-5i64..=-1, 1i64..=5], 0usize..5).prop_map(|(c, i)| Op::Scale(c, i)),
            (-5i64..=5, 0usize..5, 0usize..5).prop_map(|(c, i, j)| Op::AddScaled(c, i, j)),
        ]
    }

    fn to_vector(coords: &[i64]) -> Vector {
        coords.iter().map(|&c| Decimal::from(c)).collect()
    }

    fn system_through(matrix: &[Vec<i64>], point: &Vector) -> LinearSystem {
        let rows = matrix
            .iter()
            .map(|r| {
                let n = to_vector(r);
                let k = n.dot(point).unwrap();
                Hyperplane::new(n, k)
            })
            .collect();
        LinearSystem::new(rows).unwrap()
    }

    fn system_with_constants(matrix: &[Vec<i64>], constant: i64) -> LinearSystem {
        let rows = matrix
            .iter()
            .enumerate()
            .map(|(i, r)| Hyperplane::new(to_vector(r), Decimal::from(constant + i as i64)))
            .collect();
        LinearSystem::new(rows).unwrap()
    }

    proptest! {
        #[test]
        fn row_ops_preserve_solutions(
            (matrix, point) in matrix_and_point(),
            ops in prop::collection::vec(row_op(), 0..12),
        ) {
            let x = to_vector(&point);
            let mut s = system_through(&matrix, &x);
            let n = s.len();
            for op in ops {
                match op {
                    Op::Swap(i, j) => s.swap_rows(i % n, j % n),
                    Op::Scale(c, i) => s.scale_row(Decimal::from(c), i % n).unwrap(),
                    Op::AddScaled(c, i, j) => {
                        s.add_scaled_row(Decimal::from(c), i % n, j % n).unwrap()
                    }
                }
            }
            let tol = Tolerance::default();
            for row in s.rows() {
                prop_assert!(row.is_satisfied_by(&x, tol));
            }
        }

        #[test]
        fn reduction_preserves_solutions((matrix, point) in matrix_and_point()) {
            let x = to_vector(&point);
            let s = system_through(&matrix, &x);
            let tol = Tolerance::default();
            for row in s.compute_triangular_form().unwrap().rows() {
                prop_assert!(row.is_satisfied_by(&x, tol));
            }
            for row in s.compute_rref().unwrap().rows() {
                prop_assert!(row.is_satisfied_by(&x, tol));
            }
        }

        #[test]
        fn rref_is_idempotent(matrix in coefficients(), constant in -6i64..=6) {
            let s = system_with_constants(&matrix, constant);
            let rref = s.compute_rref().unwrap();
            prop_assert!(rref.compute_rref().unwrap().approx_eq(&rref));
        }

        #[test]
        fn triangular_pivots_increase(matrix in coefficients(), constant in -6i64..=6) {
            let s = system_with_constants(&matrix, constant);
            let pivots = s.compute_triangular_form().unwrap().pivot_indices();

            // pivot rows come first, with strictly increasing pivot columns
            let pivot_rows = pivots.iter().take_while(|p| p.is_some()).count();
            prop_assert!(pivots[pivot_rows..].iter().all(|p| p.is_none()));
            let cols: Vec<usize> = pivots.iter().flatten().copied().collect();
            prop_assert!(cols.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(cols.len(), s.rank().unwrap());
        }

        #[test]
        fn rref_pivot_columns_are_unit(matrix in coefficients(), constant in -6i64..=6) {
            let s = system_with_constants(&matrix, constant);
            let rref = s.compute_rref().unwrap();
            let tol = Tolerance::default();
            for (i, pivot) in rref.pivot_indices().into_iter().enumerate() {
                let Some(col) = pivot else { continue };
                for (j, row) in rref.rows().iter().enumerate() {
                    let expected = if i == j { Decimal::ONE } else { Decimal::ZERO };
                    prop_assert!(tol.approx_eq(row.normal_vector()[col], expected));
                }
            }
        }

        #[test]
        fn solutions_satisfy_system((matrix, point) in matrix_and_point()) {
            let x = to_vector(&point);
            let s = system_through(&matrix, &x);
            let tol = Tolerance::default();

            let solution = s.compute_solution().unwrap();
            let p = solution.parametrization();
            prop_assert!(p.is_some());
            let p = p.unwrap();
            prop_assert_eq!(p.dimension(), s.dimension());
            prop_assert_eq!(p.free_variables(), s.dimension() - s.rank().unwrap());
            prop_assert_eq!(
                matches!(solution, Solution::Unique(_)),
                p.free_variables() == 0
            );

            let params: Vec<Decimal> = (0..p.free_variables())
                .map(|i| Decimal::from(i as i64 + 2))
                .collect();
            let moved = p.point_at(&params).unwrap();
            for row in s.rows() {
                prop_assert!(row.is_satisfied_by(p.basepoint(), tol));
                prop_assert!(row.is_satisfied_by(&moved, tol));
                for d in p.direction_vectors() {
                    prop_assert!(tol.is_near_zero(row.normal_vector().dot(d).unwrap()));
                }
            }
        }

        #[test]
        fn contradiction_has_no_solution((matrix, point) in matrix_and_point()) {
            let x = to_vector(&point);
            let s = system_through(&matrix, &x);
            let first = &s[0];
            let shifted = Hyperplane::new(
                first.normal_vector().to_vector(),
                first.constant_term() + Decimal::ONE,
            );
            let mut rows = s.into_rows();
            rows.push(shifted);
            let s = LinearSystem::new(rows).unwrap();
            prop_assert_eq!(s.compute_solution(), Ok(Solution::NoSolution));
        }

        #[test]
        fn mismatched_rows_are_rejected(matrix in coefficients(), extra in 1usize..3) {
            let mut rows: Vec<Hyperplane> = matrix
                .iter()
                .map(|r| Hyperplane::new(to_vector(r), Decimal::ZERO))
                .collect();
            let dimension = rows[0].dimension();
            rows.push(Hyperplane::zero(dimension + extra));
            let err = LinearSystem::new(rows).unwrap_err();
            prop_assert!(err.is_dimension_mismatch());
        }
    }
}
