//! Second-partial-derivative test for critical points.

use super::derivative::hessian;
use crate::error::{LaminaError, Result};
use crate::linalg::{det, has_zero_eigenvalue, negative_definite, positive_definite};
use crate::primitives::Vector;
use crate::Real;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nature of a critical point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extremum {
    /// Local minimum.
    Min,
    /// Local maximum.
    Max,
    /// Saddle point.
    Saddle,
    /// The Hessian is degenerate and the test decides nothing.
    Inconclusive,
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Saddle => "saddle",
            Self::Inconclusive => "inconclusive",
        };
        f.write_str(s)
    }
}

/// Classifies the critical point `x` of `f` from its numerical Hessian.
///
/// Two variables use the closed form on `det H` and `H[0][0]`. Any other dimension
/// symmetrises the Hessian and checks its spectrum: all positive is a minimum, all
/// negative a maximum, mixed signs without a zero eigenvalue a saddle.
///
/// The caller is responsible for `x` being a critical point.
///
/// # Errors
///
/// Returns `EmptyInput` for a zero-dimensional `x`.
pub fn second_partial_derivative_test<F: Fn(&Vector) -> Real>(
    f: F,
    x: &Vector,
) -> Result<Extremum> {
    if x.is_empty() {
        return Err(LaminaError::empty_input("critical point has no coordinates"));
    }
    let h = hessian(&f, x);

    if x.len() == 2 {
        let d = det(&h)?;
        let fxx = h[(0, 0)];
        let class = if fxx > 0.0 && d > 0.0 {
            Extremum::Min
        } else if fxx < 0.0 && d > 0.0 {
            Extremum::Max
        } else if d < 0.0 {
            Extremum::Saddle
        } else {
            Extremum::Inconclusive
        };
        return Ok(class);
    }

    // the forward stencil leaves H slightly asymmetric
    let sym = h.add(&h.transpose())?.scalar_multiply(0.5);
    let class = if positive_definite(&sym)? {
        Extremum::Min
    } else if negative_definite(&sym)? {
        Extremum::Max
    } else if !has_zero_eigenvalue(&sym)? {
        Extremum::Saddle
    } else {
        Extremum::Inconclusive
    };
    Ok(class)
}
