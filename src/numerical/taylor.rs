//! Taylor approximations about a centre `c`, built one order at a time.

use super::derivative::{hessian, jacobian, num_diff, num_diff_2, num_diff_3, third_order_tensor};
use crate::error::{LaminaError, Result};
use crate::primitives::{Matrix, Vector};
use crate::Real;

/// Zeroth-order approximation: `f(c)`.
pub fn constant_approximation<F: Fn(Real) -> Real>(f: F, c: Real) -> Real {
    f(c)
}

/// `f(c) + f'(c)(x - c)`.
pub fn linear_approximation<F: Fn(Real) -> Real>(f: F, c: Real, x: Real) -> Real {
    constant_approximation(&f, c) + num_diff(&f, c) * (x - c)
}

/// Linear approximation plus `f''(c)(x - c)² / 2`.
pub fn quadratic_approximation<F: Fn(Real) -> Real>(f: F, c: Real, x: Real) -> Real {
    let d = x - c;
    linear_approximation(&f, c, x) + 0.5 * num_diff_2(&f, c) * d * d
}

/// Quadratic approximation plus `f'''(c)(x - c)³ / 6`.
pub fn cubic_approximation<F: Fn(Real) -> Real>(f: F, c: Real, x: Real) -> Real {
    let d = x - c;
    quadratic_approximation(&f, c, x) + num_diff_3(&f, c) * d * d * d / 6.0
}

fn displacement(c: &Vector, x: &Vector) -> Result<Vector> {
    if c.len() != x.len() {
        return Err(LaminaError::shape_mismatch(
            format!("[{}]", c.len()),
            format!("[{}]", x.len()),
        ));
    }
    x.sub(c)
}

/// `dᵀ M d` for a square `M`.
fn quadratic_form(m: &Matrix, d: &Vector) -> Result<Real> {
    d.dot(&m.mult_vec(d)?)
}

/// Zeroth-order approximation of a multivariate function: `f(c)`.
pub fn constant_approximation_v<F: Fn(&Vector) -> Real>(f: F, c: &Vector) -> Real {
    f(c)
}

/// `f(c) + ∇f(c) · (x - c)`.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `c` and `x` differ in length.
pub fn linear_approximation_v<F: Fn(&Vector) -> Real>(
    f: F,
    c: &Vector,
    x: &Vector,
) -> Result<Real> {
    let d = displacement(c, x)?;
    Ok(constant_approximation_v(&f, c) + jacobian(&f, c).dot(&d)?)
}

/// Linear approximation plus `(x - c)ᵀ H(c) (x - c) / 2`.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `c` and `x` differ in length.
pub fn quadratic_approximation_v<F: Fn(&Vector) -> Real>(
    f: F,
    c: &Vector,
    x: &Vector,
) -> Result<Real> {
    let d = displacement(c, x)?;
    let curvature = quadratic_form(&hessian(&f, c), &d)?;
    Ok(linear_approximation_v(&f, c, x)? + 0.5 * curvature)
}

/// Quadratic approximation plus the third-order term.
///
/// The derivative tensor is contracted with `d = x - c` once through
/// [`Tensor3::tensor_vec_mult`](crate::primitives::Tensor3::tensor_vec_mult), and the
/// resulting matrix enters a quadratic form in `d`; the sum is scaled by `1/6`.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `c` and `x` differ in length.
pub fn cubic_approximation_v<F: Fn(&Vector) -> Real>(
    f: F,
    c: &Vector,
    x: &Vector,
) -> Result<Real> {
    let d = displacement(c, x)?;
    let contracted = third_order_tensor(&f, c).tensor_vec_mult(&d)?;
    let cubic = quadratic_form(&contracted, &d)?;
    Ok(quadratic_approximation_v(&f, c, x)? + cubic / 6.0)
}
