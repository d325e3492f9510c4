//! Square linear solver: LU decomposition with partial pivoting.
//!
//! The ridge trainer reduces its fit to one square system per training call:
//!
//! ```text
//! (XᵗX + αI) · w = Xᵗy
//! ```
//!
//! which we solve by Gaussian elimination with row pivoting, then back
//! substitution. This is the O(d³) heart of the crate; every downstream
//! prediction depends on its numerical behavior.
//!
//! Implementation choices:
//! - Pivot selection takes the row with the largest absolute value in the
//!   current column, keeping the *first* such row on ties. Fixing the
//!   tie-break makes elimination fully deterministic, so retraining on
//!   identical inputs is bit-identical.
//! - A selected pivot whose magnitude is at or below [`PIVOT_EPS`] fails with
//!   `FitError::SingularSystem` instead of dividing through and letting
//!   NaN/Inf flow silently into a model.
//! - We hand-roll the elimination on nalgebra containers rather than using
//!   `DMatrix::lu`, because nalgebra's decomposition neither fixes the
//!   tie-break rule nor reports *which* pivot collapsed. The parameter
//!   dimension is tiny (low tens), so there is nothing to gain from a
//!   blocked factorization.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Pivot magnitudes at or below this are treated as numerically zero.
pub const PIVOT_EPS: f64 = 1e-12;

/// Solve `A·x = b` for square `A`.
///
/// The inputs are left untouched; elimination works on copies.
pub fn solve_lu(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(FitError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }
    if b.len() != n {
        return Err(FitError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    let mut m = a.clone();
    let mut rhs = b.clone();

    for k in 0..n {
        // Pivot row: largest |value| in column k at or below the diagonal.
        // Strict `>` keeps the smallest row index on ties.
        let mut max_row = k;
        for i in (k + 1)..n {
            if m[(i, k)].abs() > m[(max_row, k)].abs() {
                max_row = i;
            }
        }
        if max_row != k {
            m.swap_rows(k, max_row);
            rhs.swap_rows(k, max_row);
        }

        let pivot = m[(k, k)];
        if !pivot.is_finite() || pivot.abs() <= PIVOT_EPS {
            return Err(FitError::SingularSystem { column: k });
        }

        // Eliminate entries below the pivot, mirroring the row operation on b.
        for i in (k + 1)..n {
            let f = m[(i, k)] / pivot;
            for j in k..n {
                m[(i, j)] -= f * m[(k, j)];
            }
            rhs[i] -= f * rhs[k];
        }
    }

    // Back substitution on the upper-triangular system.
    let mut x = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..n {
            sum -= m[(i, j)] * x[j];
        }
        x[i] = sum / m[(i, i)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_simple_2x2() {
        // 2x + y = 5, x + 3y = 10 → x = 1, y = 3
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[5.0, 10.0]);

        let x = solve_lu(&a, &b).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn pivoting_handles_zero_diagonal() {
        // Without row pivoting the first step would divide by zero.
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let b = DVector::from_row_slice(&[2.0, 7.0]);

        let x = solve_lu(&a, &b).unwrap();
        assert!((x[0] - 7.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_is_reported_not_nan() {
        // Second row is a multiple of the first.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);

        let err = solve_lu(&a, &b).unwrap_err();
        assert!(matches!(err, FitError::SingularSystem { column: 1 }));
    }

    #[test]
    fn non_square_matrix_is_rejected() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0; 6]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);

        let err = solve_lu(&a, &b).unwrap_err();
        assert!(matches!(err, FitError::DimensionMismatch { .. }));
    }

    #[test]
    fn rhs_length_mismatch_is_rejected() {
        let a = DMatrix::identity(3, 3);
        let b = DVector::from_row_slice(&[1.0, 2.0]);

        let err = solve_lu(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            FitError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn solve_is_deterministic() {
        let a = DMatrix::from_row_slice(
            3,
            3,
            &[4.0, 1.0, 2.0, 1.0, 5.0, 1.0, 2.0, 1.0, 6.0],
        );
        let b = DVector::from_row_slice(&[7.0, 8.0, 9.0]);

        let x1 = solve_lu(&a, &b).unwrap();
        let x2 = solve_lu(&a, &b).unwrap();
        assert_eq!(x1, x2);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[5.0, 10.0]);
        let (a0, b0) = (a.clone(), b.clone());

        solve_lu(&a, &b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }
}
