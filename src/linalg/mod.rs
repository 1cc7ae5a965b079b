//! Matrix decompositions, determinants and linear solves.
//!
//! Everything here is a pure function of its inputs: arguments are borrowed
//! read-only and results are freshly allocated. The same operations are also
//! reachable as convenience methods on [`Matrix`](crate::primitives::Matrix).
//!
//! # Example
//!
//! ```
//! use lamina::linalg;
//! use lamina::primitives::Matrix;
//!
//! let a = Matrix::from_rows(&[vec![4.0, 2.0], vec![2.0, 3.0]]).unwrap();
//! let chol = linalg::cholesky(&a).unwrap();
//! let rebuilt = chol.l.matmul(&chol.lt).unwrap();
//! assert!(rebuilt.is_equal_approx(&a, 1e-12));
//! ```

mod checks;
mod cholesky;
mod determinant;
mod eigen;
mod qr;
mod solve;
mod svd;

pub use checks::{
    gram_matrix, has_zero_eigenvalue, is_linearly_independent, is_symmetric, negative_definite,
    positive_definite,
};
pub use cholesky::{cholesky, CholeskyResult};
pub use determinant::{adjoint, cofactor, det, inverse, pinverse, trace};
pub use eigen::{eigen, EigenResult, JacobiConfig};
pub use qr::{gram_schmidt, qrd, vector_projection, QrResult};
pub use solve::solve;
pub use svd::{svd, SvdResult};

use crate::error::{LaminaError, Result};
use crate::primitives::Matrix;

pub(crate) fn require_square(a: &Matrix) -> Result<usize> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(LaminaError::shape_mismatch(
            "square matrix",
            format!("{rows}x{cols}"),
        ));
    }
    Ok(rows)
}
