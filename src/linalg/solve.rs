//! General linear solve.

use super::{inverse, require_square};
use crate::error::{LaminaError, Result};
use crate::primitives::{Matrix, Vector};

/// Solves `A x = b` as `A⁻¹ b`.
///
/// For symmetric positive-definite or badly conditioned systems, factor first with
/// [`cholesky`](super::cholesky) or [`qrd`](super::qrd) and use their `solve`.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `A` is not square or `b` has the wrong length, and
/// `SingularMatrix` if `A` is singular.
///
/// # Examples
///
/// ```
/// use lamina::linalg;
/// use lamina::primitives::{Matrix, Vector};
///
/// let a = Matrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 4.0]]).unwrap();
/// let x = linalg::solve(&a, &Vector::from_slice(&[2.0, 2.0])).unwrap();
/// assert_eq!(x.as_slice(), &[1.0, 0.5]);
/// ```
pub fn solve(a: &Matrix, b: &Vector) -> Result<Vector> {
    let n = require_square(a)?;
    if b.len() != n {
        return Err(LaminaError::shape_mismatch(
            format!("vector of {n} elements"),
            format!("[{}]", b.len()),
        ));
    }
    inverse(a)?.mult_vec(b)
}
