//! Forward-difference derivatives of scalar and multivariate functions.

use crate::error::{LaminaError, Result};
use crate::primitives::{Matrix, Tensor3, Vector};
use crate::Real;

/// Step for first derivatives.
#[cfg(not(feature = "f32"))]
const FIRST_ORDER_EPS: Real = 1e-10;
#[cfg(feature = "f32")]
const FIRST_ORDER_EPS: Real = 1e-3;

/// Step for second and third derivatives.
#[cfg(not(feature = "f32"))]
const HIGHER_ORDER_EPS: Real = 1e-5;
#[cfg(feature = "f32")]
const HIGHER_ORDER_EPS: Real = 1e-2;

/// First derivative `(f(x + ε) - f(x)) / ε`.
pub fn num_diff<F: Fn(Real) -> Real>(f: F, x: Real) -> Real {
    let eps = FIRST_ORDER_EPS;
    (f(x + eps) - f(x)) / eps
}

/// Second derivative `(f(x + 2ε) - 2f(x + ε) + f(x)) / ε²`.
pub fn num_diff_2<F: Fn(Real) -> Real>(f: F, x: Real) -> Real {
    let eps = HIGHER_ORDER_EPS;
    (f(x + 2.0 * eps) - 2.0 * f(x + eps) + f(x)) / (eps * eps)
}

/// Third derivative, the difference of two second-difference stencils over `ε³`.
pub fn num_diff_3<F: Fn(Real) -> Real>(f: F, x: Real) -> Real {
    let eps = HIGHER_ORDER_EPS;
    let upper = f(x + 3.0 * eps) - 2.0 * f(x + 2.0 * eps) + f(x + eps);
    let lower = f(x + 2.0 * eps) - 2.0 * f(x + eps) + f(x);
    (upper - lower) / (eps * eps * eps)
}

fn check_axes(x: &Vector, axes: &[usize]) -> Result<()> {
    match axes.iter().find(|&&a| a >= x.len()) {
        Some(&axis) => Err(LaminaError::index_out_of_bounds(axis, x.len())),
        None => Ok(()),
    }
}

/// `x` with `eps` added once per listed axis (an axis listed twice moves twice).
fn shifted(x: &Vector, axes: &[usize], eps: Real) -> Vector {
    let mut out = x.clone();
    for &axis in axes {
        out[axis] += eps;
    }
    out
}

fn partial<F: Fn(&Vector) -> Real>(f: &F, x: &Vector, axis: usize) -> Real {
    let eps = FIRST_ORDER_EPS;
    (f(&shifted(x, &[axis], eps)) - f(x)) / eps
}

fn partial_2<F: Fn(&Vector) -> Real>(f: &F, x: &Vector, a1: usize, a2: usize) -> Real {
    let eps = HIGHER_ORDER_EPS;
    let pp = f(&shifted(x, &[a1, a2], eps));
    let np = f(&shifted(x, &[a2], eps));
    let pn = f(&shifted(x, &[a1], eps));
    (pp - np - pn + f(x)) / (eps * eps)
}

fn partial_3<F: Fn(&Vector) -> Real>(f: &F, x: &Vector, a1: usize, a2: usize, a3: usize) -> Real {
    let eps = HIGHER_ORDER_EPS;
    let with_third = f(&shifted(x, &[a1, a2, a3], eps))
        - f(&shifted(x, &[a2, a3], eps))
        - f(&shifted(x, &[a1, a3], eps))
        + f(&shifted(x, &[a3], eps));
    let without_third = f(&shifted(x, &[a1, a2], eps))
        - f(&shifted(x, &[a2], eps))
        - f(&shifted(x, &[a1], eps))
        + f(x);
    (with_third - without_third) / (eps * eps * eps)
}

/// Partial derivative of `f` along `axis` at `x`.
///
/// # Errors
///
/// Returns `IndexOutOfBounds` if `axis >= x.len()`.
pub fn num_diffv<F: Fn(&Vector) -> Real>(f: F, x: &Vector, axis: usize) -> Result<Real> {
    check_axes(x, &[axis])?;
    Ok(partial(&f, x, axis))
}

/// Mixed second partial derivative along `axis1` and `axis2`; a Hessian entry.
///
/// # Errors
///
/// Returns `IndexOutOfBounds` if either axis is out of range.
pub fn num_diff_2v<F: Fn(&Vector) -> Real>(
    f: F,
    x: &Vector,
    axis1: usize,
    axis2: usize,
) -> Result<Real> {
    check_axes(x, &[axis1, axis2])?;
    Ok(partial_2(&f, x, axis1, axis2))
}

/// Mixed third partial derivative; an entry of the third-order derivative tensor.
///
/// Cancellation makes this noisy wherever `|f|` is large relative to `ε³`.
///
/// # Errors
///
/// Returns `IndexOutOfBounds` if any axis is out of range.
pub fn num_diff_3v<F: Fn(&Vector) -> Real>(
    f: F,
    x: &Vector,
    axis1: usize,
    axis2: usize,
    axis3: usize,
) -> Result<Real> {
    check_axes(x, &[axis1, axis2, axis3])?;
    Ok(partial_3(&f, x, axis1, axis2, axis3))
}

/// Gradient of a scalar field: one first partial per axis.
pub fn jacobian<F: Fn(&Vector) -> Real>(f: F, x: &Vector) -> Vector {
    (0..x.len()).map(|i| partial(&f, x, i)).collect()
}

/// Matrix of second partials, `H[i][j] = ∂²f / ∂x_i ∂x_j`.
///
/// The forward stencil is not exactly symmetric in `i` and `j`.
pub fn hessian<F: Fn(&Vector) -> Real>(f: F, x: &Vector) -> Matrix {
    let n = x.len();
    let mut h = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            h[(i, j)] = partial_2(&f, x, i, j);
        }
    }
    h
}

/// Third-order derivative tensor, `T[i][j][k] = ∂³f / ∂x_i ∂x_j ∂x_k`.
///
/// Costs O(n³) stencils of eight evaluations each.
pub fn third_order_tensor<F: Fn(&Vector) -> Real>(f: F, x: &Vector) -> Tensor3 {
    let n = x.len();
    let mut t = Tensor3::zeros(n, n, n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                t[(i, j, k)] = partial_3(&f, x, i, j, k);
            }
        }
    }
    t
}

/// Sum of the pure second partials (trace of the Hessian).
pub fn laplacian<F: Fn(&Vector) -> Real>(f: F, x: &Vector) -> Real {
    (0..x.len()).map(|i| partial_2(&f, x, i, i)).sum()
}
