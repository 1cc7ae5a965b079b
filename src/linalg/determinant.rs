//! Determinant family: determinant, minors, adjugate, inverse and pseudo-inverse.

use super::require_square;
use crate::error::{LaminaError, Result};
use crate::primitives::Matrix;
use crate::Real;

/// Laplace expansion is factorial in `n`; larger inputs are logged.
const LAPLACE_WARN_DIM: usize = 10;

/// Multiple of machine epsilon used by the relative singularity test.
const SINGULAR_EPS_FACTOR: Real = 64.0;

/// Determinant by recursive cofactor expansion along the first row.
///
/// A 0x0 matrix has determinant 1.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the matrix is not square.
pub fn det(a: &Matrix) -> Result<Real> {
    let n = require_square(a)?;
    if n > LAPLACE_WARN_DIM {
        tracing::warn!(n = n, "laplace expansion on a large matrix, cost grows as n!");
    }
    Ok(laplace(a.as_slice(), n))
}

fn laplace(data: &[Real], n: usize) -> Real {
    match n {
        0 => 1.0,
        1 => data[0],
        2 => data[0] * data[3] - data[1] * data[2],
        _ => {
            let mut total = 0.0;
            let mut sign = 1.0;
            for j in 0..n {
                let a0j = data[j];
                if a0j != 0.0 {
                    total += sign * a0j * laplace(&minor(data, n, 0, j), n - 1);
                }
                sign = -sign;
            }
            total
        }
    }
}

fn minor(data: &[Real], n: usize, skip_row: usize, skip_col: usize) -> Vec<Real> {
    let mut out = Vec::with_capacity((n - 1) * (n - 1));
    for r in (0..n).filter(|&r| r != skip_row) {
        for c in (0..n).filter(|&c| c != skip_col) {
            out.push(data[r * n + c]);
        }
    }
    out
}

/// Minor sub-matrix of `a` with row `i` and column `j` removed.
///
/// # Errors
///
/// Returns `ShapeMismatch` for a non-square matrix and `IndexOutOfBounds` for a bad `i` or `j`.
pub fn cofactor(a: &Matrix, i: usize, j: usize) -> Result<Matrix> {
    let n = require_square(a)?;
    if i >= n {
        return Err(LaminaError::index_out_of_bounds(i, n));
    }
    if j >= n {
        return Err(LaminaError::index_out_of_bounds(j, n));
    }
    Matrix::from_vec(n - 1, n - 1, minor(a.as_slice(), n, i, j))
}

/// Adjugate: the transpose of the signed cofactor matrix.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the matrix is not square.
pub fn adjoint(a: &Matrix) -> Result<Matrix> {
    let n = require_square(a)?;
    let data = a.as_slice();
    let mut adj = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            // adj[j][i] = C[i][j]
            adj[(j, i)] = sign * laplace(&minor(data, n, i, j), n - 1);
        }
    }
    Ok(adj)
}

/// Relative singularity test against the Hadamard bound `|det| <= prod ||row_i||`.
pub(crate) fn is_singular(a: &Matrix, det: Real) -> bool {
    let (n, cols) = a.shape();
    if n == 0 {
        return false;
    }
    let hadamard: Real = (0..n)
        .map(|r| {
            a.as_slice()[r * cols..(r + 1) * cols]
                .iter()
                .map(|x| x * x)
                .sum::<Real>()
                .sqrt()
        })
        .product();
    !det.is_finite() || det.abs() <= n as Real * SINGULAR_EPS_FACTOR * Real::EPSILON * hadamard
}

/// Inverse as adjugate / determinant.
///
/// # Errors
///
/// Returns `ShapeMismatch` for a non-square matrix and `SingularMatrix` when the
/// determinant is zero relative to the scale of the rows.
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    let d = det(a)?;
    if is_singular(a, d) {
        tracing::warn!(det = d, n = a.n_rows(), "singular matrix detected");
        return Err(LaminaError::SingularMatrix { det: d });
    }
    Ok(adjoint(a)?.scalar_multiply(1.0 / d))
}

/// Moore-Penrose pseudo-inverse via the normal equations.
///
/// Tall or square inputs use `(AᵀA)⁻¹Aᵀ`, wide inputs use `Aᵀ(AAᵀ)⁻¹`.
///
/// # Errors
///
/// Returns `SingularMatrix` when the Gram matrix is singular (rank-deficient input).
pub fn pinverse(a: &Matrix) -> Result<Matrix> {
    let at = a.transpose();
    if a.n_rows() >= a.n_cols() {
        inverse(&at.matmul(a)?)?.matmul(&at)
    } else {
        at.matmul(&inverse(&a.matmul(&at)?)?)
    }
}

/// Sum of the diagonal of a square matrix.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the matrix is not square.
pub fn trace(a: &Matrix) -> Result<Real> {
    a.trace()
}
