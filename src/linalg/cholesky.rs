//! Cholesky factorisation `A = L · Lᵀ` of symmetric positive-definite matrices.

use super::{is_symmetric, require_square};
use crate::error::{LaminaError, Result};
use crate::primitives::{Matrix, Vector};
use crate::CMP_EPSILON;
use serde::{Deserialize, Serialize};

/// Lower-triangular factor and its transpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CholeskyResult {
    /// Lower-triangular factor with a positive diagonal.
    pub l: Matrix,
    /// Transpose of `l`.
    pub lt: Matrix,
}

impl CholeskyResult {
    /// Solves `A x = b` by forward substitution on `L y = b` and back substitution on
    /// `Lᵀ x = y`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `b.len()` differs from the matrix size.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        let n = self.l.n_rows();
        if b.len() != n {
            return Err(LaminaError::shape_mismatch(
                format!("vector of {n} elements"),
                format!("[{}]", b.len()),
            ));
        }
        let l = &self.l;

        // Forward substitution: L * y = b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += l[(i, j)] * y[j];
            }
            y[i] = (b[i] - sum) / l[(i, i)];
        }

        // Backward substitution: L^T * x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += l[(j, i)] * x[j];
            }
            x[i] = (y[i] - sum) / l[(i, i)];
        }

        Ok(Vector::from_vec(x))
    }
}

/// Factors a symmetric positive-definite matrix column by column.
///
/// # Errors
///
/// Returns `ShapeMismatch` for a non-square matrix, `InvalidArgument` for a
/// non-symmetric one and `NotPositiveDefinite` when a pivot is not strictly positive.
pub fn cholesky(a: &Matrix) -> Result<CholeskyResult> {
    let n = require_square(a)?;
    if !is_symmetric(a, CMP_EPSILON * a.norm_frobenius().max(1.0)) {
        return Err(LaminaError::invalid_argument(
            "matrix",
            "non-symmetric input",
            "a symmetric positive-definite matrix",
        ));
    }

    let mut l = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            if i == j {
                for k in 0..j {
                    sum += l[(j, k)] * l[(j, k)];
                }
                let diag = a[(j, j)] - sum;
                if diag <= 0.0 {
                    return Err(LaminaError::NotPositiveDefinite {
                        pivot: j,
                        value: diag,
                    });
                }
                l[(j, j)] = diag.sqrt();
            } else {
                for k in 0..j {
                    sum += l[(i, k)] * l[(j, k)];
                }
                l[(i, j)] = (a[(i, j)] - sum) / l[(j, j)];
            }
        }
    }

    let lt = l.transpose();
    Ok(CholeskyResult { l, lt })
}
