//! QR decomposition by classical Gram-Schmidt, plus the projection helpers it is built on.

use crate::error::{LaminaError, Result};
use crate::primitives::{Matrix, Vector};
use crate::{Real, CMP_EPSILON};
use serde::{Deserialize, Serialize};

/// `A = Q · R` with column-orthonormal `Q` (m×n) and upper-triangular `R` (n×n).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrResult {
    /// Column-orthonormal factor.
    pub q: Matrix,
    /// Upper-triangular factor.
    pub r: Matrix,
}

impl QrResult {
    /// Solves `A x = b` in the least-squares sense by back substitution on `R x = Qᵀ b`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `b.len()` differs from the row count of `Q`, and
    /// `SingularMatrix` if `R` has a zero on its diagonal.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        let qtb = self.q.transpose().mult_vec(b)?;
        let n = self.r.n_rows();
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let rii = self.r[(i, i)];
            if rii == 0.0 {
                return Err(LaminaError::SingularMatrix {
                    det: self.r.diagonal().as_slice().iter().product(),
                });
            }
            let tail: Real = (i + 1..n).map(|j| self.r[(i, j)] * x[j]).sum();
            x[i] = (qtb[i] - tail) / rii;
        }
        Ok(Vector::from_vec(x))
    }
}

/// Projection of `u` onto the line spanned by `v`.
///
/// # Errors
///
/// Returns `ShapeMismatch` for different lengths and `InvalidArgument` if `v` is zero.
pub fn vector_projection(u: &Vector, v: &Vector) -> Result<Vector> {
    let vv = v.norm_sq();
    if vv == 0.0 {
        return Err(LaminaError::invalid_argument(
            "v",
            "zero vector",
            "a non-zero direction",
        ));
    }
    Ok(v.scalar_multiply(u.dot(v)? / vv))
}

/// Orthonormalises the columns of `a` (classical Gram-Schmidt).
///
/// # Errors
///
/// Returns `RankDeficient` when a column lies (numerically) in the span of the
/// columns before it.
pub fn gram_schmidt(a: &Matrix) -> Result<Matrix> {
    let (rows, cols) = a.shape();
    let mut q = Matrix::zeros(rows, cols);
    let mut basis: Vec<Vector> = Vec::with_capacity(cols);
    for j in 0..cols {
        let aj = a.column(j)?;
        let mut residual = aj.clone();
        for e in &basis {
            residual.sub_in_place(&vector_projection(&aj, e)?)?;
        }
        let norm = residual.norm_2();
        if norm <= CMP_EPSILON * aj.norm_2() {
            return Err(LaminaError::RankDeficient { column: j });
        }
        let e = residual.scalar_multiply(1.0 / norm);
        q.set_column(j, &e)?;
        basis.push(e);
    }
    Ok(q)
}

/// QR decomposition of an m×n matrix with `m >= n` and full column rank.
///
/// `Q` comes from Gram-Schmidt on the columns of `A`; `R = Qᵀ A`.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `m < n` and `RankDeficient` for linearly dependent columns.
pub fn qrd(a: &Matrix) -> Result<QrResult> {
    let (rows, cols) = a.shape();
    if rows < cols {
        return Err(LaminaError::shape_mismatch(
            "rows >= cols",
            format!("{rows}x{cols}"),
        ));
    }
    let q = gram_schmidt(a)?;
    let r = q.transpose().matmul(a)?;
    Ok(QrResult { q, r })
}
