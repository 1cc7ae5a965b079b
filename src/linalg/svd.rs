//! Singular value decomposition through the eigendecomposition of AᵀA.

use super::eigen::{eigen, JacobiConfig};
use crate::error::Result;
use crate::primitives::{Matrix, Vector};
use crate::Real;
use serde::{Deserialize, Serialize};

/// `A = U · S · Vt` with `U` (m×m) and `Vt` (n×n) orthogonal and `S` (m×n) diagonal.
///
/// Singular values on the diagonal of `S` are non-negative and descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvdResult {
    /// Left singular vectors, one per column.
    pub u: Matrix,
    /// Rectangular diagonal matrix of singular values.
    pub s: Matrix,
    /// Right singular vectors, one per row.
    pub vt: Matrix,
}

impl SvdResult {
    /// Singular values in descending order.
    #[must_use]
    pub fn singular_values(&self) -> Vector {
        self.s.diagonal()
    }
}

/// Singular value decomposition of an arbitrary m×n matrix.
///
/// `V` and the singular values come from the eigendecomposition of `AᵀA`. Each left
/// singular vector with a non-negligible singular value is `A·v_i / σ_i`, which fixes
/// its sign against `v_i`. The remaining columns of `U` are completed from the
/// eigenvectors of `AAᵀ`, orthogonalised against the columns already found.
///
/// # Errors
///
/// Propagates shape errors from the underlying products; the Gram matrices are
/// symmetric by construction, so the eigen step itself does not fail.
pub fn svd(a: &Matrix, config: &JacobiConfig) -> Result<SvdResult> {
    let (m, n) = a.shape();
    let at = a.transpose();
    let right = eigen(&at.matmul(a)?, config)?;
    let mut sigma: Vec<Real> = right
        .eigenvalues()
        .as_slice()
        .iter()
        .map(|&l| l.max(0.0).sqrt())
        .collect();

    let k = m.min(n);
    let sigma_max = sigma.first().copied().unwrap_or(0.0);
    let cutoff = sigma_max * m.max(n) as Real * Real::EPSILON.sqrt();

    let mut u_cols: Vec<Vector> = Vec::with_capacity(m);
    for (i, &s) in sigma.iter().enumerate().take(k) {
        if s <= cutoff || s == 0.0 {
            break;
        }
        let av = a.mult_vec(&right.vectors.column(i)?)?;
        u_cols.push(av.scalar_multiply(1.0 / s));
    }
    // below the cutoff the square root of a rounding-level eigenvalue is noise
    for s in sigma.iter_mut().skip(u_cols.len()) {
        *s = 0.0;
    }

    if u_cols.len() < m {
        let left = eigen(&a.matmul(&at)?, config)?;
        let mut candidates = (0..m)
            .map(|j| left.vectors.column(j))
            .collect::<Result<Vec<_>>>()?;
        complete_basis(&mut u_cols, &mut candidates, m)?;
    }

    let mut u = Matrix::zeros(m, m);
    for (j, col) in u_cols.iter().enumerate() {
        u.set_column(j, col)?;
    }
    let mut s = Matrix::zeros(m, n);
    for (i, &v) in sigma.iter().enumerate().take(k) {
        s[(i, i)] = v;
    }

    Ok(SvdResult {
        u,
        s,
        vt: right.vectors.transpose(),
    })
}

/// Extends an orthonormal set to `dim` vectors, each time taking the candidate with
/// the largest component orthogonal to the current set.
fn complete_basis(basis: &mut Vec<Vector>, candidates: &mut Vec<Vector>, dim: usize) -> Result<()> {
    while basis.len() < dim && !candidates.is_empty() {
        let mut best: Option<(usize, Vector, Real)> = None;
        for (idx, cand) in candidates.iter().enumerate() {
            let mut r = cand.clone();
            for b in basis.iter() {
                let proj = r.dot(b)?;
                r.sub_in_place(&b.scalar_multiply(proj))?;
            }
            let norm = r.norm_2();
            if best.as_ref().map_or(true, |(_, _, n)| norm > *n) {
                best = Some((idx, r, norm));
            }
        }
        match best {
            Some((idx, r, norm)) if norm > 0.0 => {
                candidates.swap_remove(idx);
                basis.push(r.scalar_multiply(1.0 / norm));
            }
            _ => break,
        }
    }
    Ok(())
}
