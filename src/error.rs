//! Error types for Lamina operations.
//!
//! Shape and index errors are raised by the call that detects them, before any
//! mutation happens. Numeric degeneracy (singular or indefinite input) is reported
//! as an explicit variant instead of leaking NaN or infinity into the result.

use crate::Real;
use std::fmt::Display;
use thiserror::Error;

/// Main error type for Lamina operations.
///
/// # Examples
///
/// ```
/// use lamina::error::LaminaError;
///
/// let err = LaminaError::ShapeMismatch {
///     expected: "2x3".to_string(),
///     actual: "3x2".to_string(),
/// };
/// assert!(err.to_string().contains("shape mismatch"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaminaError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Checked element, row or feature-map access out of range.
    #[error("index {index} out of bounds (len={len})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length of the indexed dimension
        len: usize,
    },

    /// Matrix is singular (non-invertible).
    #[error("singular matrix detected: determinant = {det}, cannot invert")]
    SingularMatrix {
        /// Determinant value (close to zero)
        det: Real,
    },

    /// A non-positive pivot was met while factoring a matrix that must be positive definite.
    #[error("matrix is not positive definite: pivot {pivot} = {value}")]
    NotPositiveDefinite {
        /// Diagonal position of the failing pivot
        pivot: usize,
        /// Value that would have been square-rooted
        value: Real,
    },

    /// A column is linearly dependent on the columns before it.
    #[error("rank deficient: column {column} is linearly dependent on earlier columns")]
    RankDeficient {
        /// Offending column index
        column: usize,
    },

    /// Invalid argument value provided.
    #[error("invalid argument: {param} = {value}, expected {constraint}")]
    InvalidArgument {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Operation requires non-empty input.
    #[error("empty input: {0}")]
    EmptyInput(String),
}

impl LaminaError {
    /// Create a shape mismatch error from two displayable shape descriptions.
    #[must_use]
    pub fn shape_mismatch(expected: impl Display, actual: impl Display) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(param: &str, value: impl Display, constraint: &str) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, LaminaError>;
