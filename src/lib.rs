//! Lamina: dense linear algebra and numerical analysis kernel for machine learning.
//!
//! Every model in a from-scratch ML stack (regressions, neural nets, k-means, PCA,
//! SVMs) reduces to a loop around a small numerical core. Lamina is that core:
//! dense containers, their arithmetic, matrix decompositions and finite-difference
//! calculus, written as straightforward O(n³)-class algorithms.
//!
//! # Quick Start
//!
//! ```
//! use lamina::prelude::*;
//!
//! // 1.0x + 1.0y = 2200, 1.5x + 4.0y = 5050
//! let a = Matrix::from_rows(&[vec![1.0, 1.0], vec![1.5, 4.0]]).unwrap();
//! let b = Vector::from_slice(&[2200.0, 5050.0]);
//!
//! let x = a.solve(&b).unwrap();
//! assert!(x.is_equal_approx(&Vector::from_slice(&[1500.0, 700.0]), 1e-6));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: `Vector`, `Matrix`, `Tensor3` and the `Image` buffer
//! - [`linalg`]: determinant family, eigen/SVD/QR/Cholesky, linear solve, definiteness checks
//! - [`numerical`]: finite differences, Taylor approximations, root finding, Euler stepping
//! - [`error`]: the crate-wide error type
//!
//! # Precision
//!
//! All containers store [`Real`], which is `f64` unless the crate is built with the
//! `f32` feature. The choice is made once at build time; there is no per-call precision.

pub mod error;
pub mod linalg;
pub mod numerical;
pub mod prelude;
pub mod primitives;

pub use error::{LaminaError, Result};

/// Scalar type used by every container and algorithm in the crate.
#[cfg(not(feature = "f32"))]
pub type Real = f64;

/// Scalar type used by every container and algorithm in the crate.
#[cfg(feature = "f32")]
pub type Real = f32;

/// Default tolerance for approximate equality comparisons.
pub const CMP_EPSILON: Real = 1e-6;

/// Error function of a single scalar.
#[cfg(not(feature = "f32"))]
#[inline]
pub(crate) fn erf(x: Real) -> Real {
    libm::erf(x)
}

/// Error function of a single scalar.
#[cfg(feature = "f32")]
#[inline]
pub(crate) fn erf(x: Real) -> Real {
    libm::erff(x)
}
