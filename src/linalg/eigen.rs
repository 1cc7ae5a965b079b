//! Symmetric eigendecomposition by classical Jacobi rotations.

use super::{is_symmetric, require_square};
use crate::error::{LaminaError, Result};
use crate::primitives::{Matrix, Vector};
use crate::{Real, CMP_EPSILON};
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "f32"))]
const DEFAULT_TOLERANCE: Real = 1e-12;
#[cfg(feature = "f32")]
const DEFAULT_TOLERANCE: Real = 1e-5;

/// Stopping rule for the Jacobi iteration.
///
/// The iteration stops as soon as the off-diagonal Frobenius norm drops to
/// `tolerance * max(1, ||A||_F)` or after `max_iterations` rotations, whichever
/// comes first.
///
/// # Examples
///
/// ```
/// use lamina::linalg::JacobiConfig;
///
/// let cfg = JacobiConfig::default().with_max_iterations(500).with_tolerance(1e-9);
/// assert_eq!(cfg.max_iterations, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JacobiConfig {
    /// Maximum number of rotations.
    pub max_iterations: usize,
    /// Relative off-diagonal tolerance.
    pub tolerance: Real,
}

impl Default for JacobiConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl JacobiConfig {
    /// Set the rotation budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relative off-diagonal tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Eigenvectors (as columns) and the diagonal eigenvalue matrix.
///
/// Eigenvalues are sorted in descending order; column `i` of `vectors`
/// belongs to `values[(i, i)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenResult {
    /// Orthonormal eigenvectors, one per column.
    pub vectors: Matrix,
    /// Diagonal matrix of eigenvalues.
    pub values: Matrix,
}

impl EigenResult {
    /// Eigenvalues as a vector, in descending order.
    #[must_use]
    pub fn eigenvalues(&self) -> Vector {
        self.values.diagonal()
    }
}

/// Eigendecomposition of a symmetric matrix.
///
/// Each step zeroes the largest off-diagonal entry `a_pq` with the rotation angle
/// `θ = ½·atan2(2a_pq, a_pp − a_qq)`, accumulating rotations into the eigenvector matrix.
///
/// # Errors
///
/// Returns `ShapeMismatch` for a non-square matrix and `InvalidArgument` if the
/// matrix is not symmetric.
pub fn eigen(a: &Matrix, config: &JacobiConfig) -> Result<EigenResult> {
    let n = require_square(a)?;
    let scale = a.norm_frobenius().max(1.0);
    if !is_symmetric(a, CMP_EPSILON * scale) {
        return Err(LaminaError::invalid_argument(
            "matrix",
            "non-symmetric input",
            "a symmetric matrix",
        ));
    }

    let mut work = a.clone();
    let mut vectors = Matrix::identity(n);
    let threshold = config.tolerance * scale;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let (p, q, off) = largest_off_diagonal(&work);
        if off <= threshold {
            converged = true;
            break;
        }
        rotate(&mut work, &mut vectors, p, q);
        iterations += 1;
    }
    if !converged {
        let (_, _, off) = largest_off_diagonal(&work);
        converged = off <= threshold;
    }

    if converged {
        tracing::debug!(n = n, iterations = iterations, "jacobi eigendecomposition converged");
    } else {
        tracing::warn!(
            n = n,
            max_iterations = config.max_iterations,
            "jacobi rotation budget exhausted before tolerance was met"
        );
    }

    Ok(sorted_descending(&work, &vectors))
}

/// Returns `(p, q, off_norm)` where `(p, q)` with `p < q` is the largest off-diagonal
/// entry and `off_norm` the Frobenius norm of the off-diagonal part.
fn largest_off_diagonal(a: &Matrix) -> (usize, usize, Real) {
    let n = a.n_rows();
    let data = a.as_slice();
    let (mut p, mut q) = (0, 1.min(n.saturating_sub(1)));
    let mut best = -1.0;
    let mut sum_sq = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            let v = data[i * n + j];
            sum_sq += 2.0 * v * v;
            if v.abs() > best {
                best = v.abs();
                p = i;
                q = j;
            }
        }
    }
    (p, q, sum_sq.sqrt())
}

fn rotate(a: &mut Matrix, v: &mut Matrix, p: usize, q: usize) {
    let n = a.n_rows();
    let theta = 0.5 * (2.0 * a[(p, q)]).atan2(a[(p, p)] - a[(q, q)]);
    let (s, c) = theta.sin_cos();

    // A <- A P
    rotate_columns(a, n, p, q, c, s);
    // A <- Pᵀ A
    let data = a.as_mut_slice();
    for k in 0..n {
        let (apk, aqk) = (data[p * n + k], data[q * n + k]);
        data[p * n + k] = c * apk + s * aqk;
        data[q * n + k] = -s * apk + c * aqk;
    }
    data[p * n + q] = 0.0;
    data[q * n + p] = 0.0;
    // V <- V P
    rotate_columns(v, n, p, q, c, s);
}

fn rotate_columns(m: &mut Matrix, n: usize, p: usize, q: usize, c: Real, s: Real) {
    let data = m.as_mut_slice();
    for k in 0..n {
        let (akp, akq) = (data[k * n + p], data[k * n + q]);
        data[k * n + p] = c * akp + s * akq;
        data[k * n + q] = -s * akp + c * akq;
    }
}

fn sorted_descending(diag_form: &Matrix, vectors: &Matrix) -> EigenResult {
    let n = diag_form.n_rows();
    let raw = diag_form.diagonal();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| raw[j].total_cmp(&raw[i]));

    let mut sorted_vectors = Matrix::zeros(n, n);
    let mut values = Matrix::zeros(n, n);
    for (dst, &src) in order.iter().enumerate() {
        values[(dst, dst)] = raw[src];
        for k in 0..n {
            sorted_vectors[(k, dst)] = vectors[(k, src)];
        }
    }
    EigenResult {
        vectors: sorted_vectors,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[Real]]) -> Matrix {
        let nested: Vec<Vec<Real>> = rows.iter().map(|r| r.to_vec()).collect();
        Matrix::from_rows(&nested).expect("rectangular")
    }

    fn reconstruct(e: &EigenResult) -> Matrix {
        e.vectors
            .matmul(&e.values)
            .and_then(|vd| vd.matmul(&e.vectors.transpose()))
            .expect("square factors")
    }

    #[test]
    fn test_all_ones_2x2() {
        let e = eigen(&m(&[&[1.0, 1.0], &[1.0, 1.0]]), &JacobiConfig::default()).unwrap();
        let values = e.eigenvalues();
        assert!((values[0] - 2.0).abs() < 1e-12);
        assert!(values[1].abs() < 1e-12);
        let h = (0.5 as Real).sqrt();
        assert!((e.vectors[(0, 0)].abs() - h).abs() < 1e-12);
        assert!((e.vectors[(1, 0)].abs() - h).abs() < 1e-12);
    }

    #[test]
    fn test_identity_input() {
        let e = eigen(&Matrix::identity(3), &JacobiConfig::default()).unwrap();
        assert_eq!(e.vectors, Matrix::identity(3));
        assert_eq!(e.values, Matrix::identity(3));
    }

    #[test]
    fn test_diagonal_sorted_descending() {
        let a = Matrix::from_diagonal(&Vector::from_slice(&[1.0, 5.0, 3.0]));
        let e = eigen(&a, &JacobiConfig::default()).unwrap();
        assert_eq!(e.eigenvalues().as_slice(), &[5.0, 3.0, 1.0]);
        assert_eq!(e.vectors.column(0).unwrap().as_slice(), &[0.0, 1.0, 0.0]);
        assert_eq!(e.vectors.column(2).unwrap().as_slice(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reconstruction_and_orthogonality() {
        let a = m(&[
            &[4.0, 1.0, -2.0, 2.0],
            &[1.0, 2.0, 0.0, 1.0],
            &[-2.0, 0.0, 3.0, -2.0],
            &[2.0, 1.0, -2.0, -1.0],
        ]);
        let e = eigen(&a, &JacobiConfig::default()).unwrap();
        assert!(reconstruct(&e).is_equal_approx(&a, 1e-9));
        let vtv = e.vectors.transpose().matmul(&e.vectors).unwrap();
        assert!(vtv.is_equal_approx(&Matrix::identity(4), 1e-9));
        let vals = e.eigenvalues();
        assert!(vals.as_slice().windows(2).all(|w| w[0] >= w[1]));
        assert!((vals.sum() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_square_and_non_symmetric() {
        assert!(matches!(
            eigen(&Matrix::zeros(2, 3), &JacobiConfig::default()),
            Err(LaminaError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            eigen(&m(&[&[1.0, 2.0], &[0.0, 1.0]]), &JacobiConfig::default()),
            Err(LaminaError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_zero_budget_returns_input_diagonal() {
        let a = m(&[&[2.0, 1.0], &[1.0, 2.0]]);
        let cfg = JacobiConfig::default().with_max_iterations(0);
        let e = eigen(&a, &cfg).unwrap();
        assert_eq!(e.eigenvalues().as_slice(), &[2.0, 2.0]);
        assert_eq!(e.vectors, Matrix::identity(2));
    }

    #[test]
    fn test_empty_matrix() {
        let e = eigen(&Matrix::new(), &JacobiConfig::default()).unwrap();
        assert!(e.vectors.is_empty());
        assert!(e.eigenvalues().is_empty());
    }
}
