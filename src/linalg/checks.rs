//! Structural and spectral predicates on matrices.

use super::determinant::is_singular;
use super::eigen::{eigen, JacobiConfig};
use super::{det, require_square};
use crate::error::Result;
use crate::primitives::Matrix;
use crate::{Real, CMP_EPSILON};

/// Returns true if `a` is square and `|a_ij - a_ji| <= tolerance` everywhere.
#[must_use]
pub fn is_symmetric(a: &Matrix, tolerance: Real) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.n_rows();
    (0..n).all(|i| (i + 1..n).all(|j| (a[(i, j)] - a[(j, i)]).abs() <= tolerance))
}

/// Gram matrix `AᵀA` of the columns of `a`.
///
/// # Errors
///
/// Infallible for well-formed matrices; the product shapes always agree.
pub fn gram_matrix(a: &Matrix) -> Result<Matrix> {
    a.transpose().matmul(a)
}

/// Eigenvalues together with the magnitude below which one counts as zero.
fn spectrum(a: &Matrix) -> Result<(Vec<Real>, Real)> {
    require_square(a)?;
    let values = eigen(a, &JacobiConfig::default())?.eigenvalues().into_vec();
    let largest = values.iter().fold(0.0 as Real, |acc, v| acc.max(v.abs()));
    Ok((values, CMP_EPSILON * largest.max(1.0)))
}

/// True when every eigenvalue is strictly positive (beyond the zero tolerance).
///
/// # Errors
///
/// Returns `ShapeMismatch` or `InvalidArgument` for non-square or non-symmetric input.
pub fn positive_definite(a: &Matrix) -> Result<bool> {
    let (values, tol) = spectrum(a)?;
    Ok(values.iter().all(|&v| v > tol))
}

/// True when every eigenvalue is strictly negative (beyond the zero tolerance).
///
/// # Errors
///
/// Returns `ShapeMismatch` or `InvalidArgument` for non-square or non-symmetric input.
pub fn negative_definite(a: &Matrix) -> Result<bool> {
    let (values, tol) = spectrum(a)?;
    Ok(values.iter().all(|&v| v < -tol))
}

/// True when at least one eigenvalue is zero within tolerance.
///
/// # Errors
///
/// Returns `ShapeMismatch` or `InvalidArgument` for non-square or non-symmetric input.
pub fn has_zero_eigenvalue(a: &Matrix) -> Result<bool> {
    let (values, tol) = spectrum(a)?;
    Ok(values.iter().any(|&v| v.abs() <= tol))
}

/// True when the columns of `a` are linearly independent, judged by whether the
/// Gram matrix is non-singular.
///
/// # Errors
///
/// Infallible for well-formed matrices.
pub fn is_linearly_independent(a: &Matrix) -> Result<bool> {
    let g = gram_matrix(a)?;
    let d = det(&g)?;
    Ok(!is_singular(&g, d))
}
