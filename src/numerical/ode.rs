//! Explicit Euler stepping and the closed-form exponential growth law.

use crate::error::{LaminaError, Result};
use crate::primitives::Vector;
use crate::{Real, CMP_EPSILON};

/// Number of whole steps of size `h` from `t0` to `p`; zero when `p <= t0`.
fn step_count(t0: Real, p: Real, h: Real) -> Result<usize> {
    if !(h.is_finite() && h > 0.0) {
        return Err(LaminaError::invalid_argument(
            "h",
            h,
            "a finite positive step size",
        ));
    }
    if !(t0.is_finite() && p.is_finite()) {
        return Err(LaminaError::invalid_argument(
            "p",
            p,
            "finite start and end points",
        ));
    }
    // nudge so that e.g. 0.3 / 0.1 counts three steps
    let steps = ((p - t0) / h + CMP_EPSILON).floor();
    Ok(if steps > 0.0 { steps as usize } else { 0 })
}

/// Integrates `dy/dt = derivative(t)` from `q0 = (t0, y0)` up to `p` with step `h`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `h` is not finite and positive, or an end point is
/// not finite.
pub fn euler_method<F: Fn(Real) -> Real>(
    derivative: F,
    q0: (Real, Real),
    p: Real,
    h: Real,
) -> Result<Real> {
    euler_method_v(|t, _| derivative(t), q0, p, h)
}

/// Integrates `dy/dt = derivative(t, y)` from `q0 = (t0, y0)` up to `p` with step `h`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `h` is not finite and positive, or an end point is
/// not finite.
pub fn euler_method_v<F: Fn(Real, Real) -> Real>(
    derivative: F,
    q0: (Real, Real),
    p: Real,
    h: Real,
) -> Result<Real> {
    let (mut t, mut y) = q0;
    let steps = step_count(t, p, h)?;
    for _ in 0..steps {
        y += h * derivative(t, y);
        t += h;
    }
    tracing::debug!(steps = steps, t = t, y = y, "euler integration finished");
    Ok(y)
}

/// Integrates the system `dq/dt = derivative(t, q)` from `(t0, y0)` up to `p`.
///
/// # Errors
///
/// Returns `InvalidArgument` for a bad step or end point, and `ShapeMismatch` if
/// `derivative` returns a vector whose length differs from the state.
pub fn euler_method_system<F: Fn(Real, &Vector) -> Vector>(
    derivative: F,
    t0: Real,
    y0: &Vector,
    p: Real,
    h: Real,
) -> Result<Vector> {
    let steps = step_count(t0, p, h)?;
    let mut t = t0;
    let mut y = y0.clone();
    for _ in 0..steps {
        let slope = derivative(t, &y).scalar_multiply(h);
        y.add_in_place(&slope)?;
        t += h;
    }
    tracing::debug!(steps = steps, t = t, dim = y.len(), "euler system integration finished");
    Ok(y)
}

/// Solution `C·e^{kt}` of `dP/dt = kP`.
#[must_use]
pub fn growth_method(c: Real, k: Real, t: Real) -> Real {
    c * (k * t).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euler_constant_slope_is_exact() {
        let y = euler_method(|_| 2.0, (0.0, 1.0), 1.0, 0.1).unwrap();
        assert!((y - 3.0).abs() < 1e-12, "y = {y}");
    }

    #[test]
    fn test_euler_step_count_rounding() {
        // 0.3 / 0.1 is just below 3 in binary; three steps must still be taken
        let y = euler_method(|_| 1.0, (0.0, 0.0), 0.3, 0.1).unwrap();
        assert!((y - 0.3).abs() < 1e-12, "y = {y}");
    }

    #[test]
    fn test_euler_state_dependent_approaches_exponential() {
        // y' = y, y(0) = 1 → y(1) = e; Euler error shrinks with h
        let coarse = euler_method_v(|_, y| y, (0.0, 1.0), 1.0, 0.01).unwrap();
        let fine = euler_method_v(|_, y| y, (0.0, 1.0), 1.0, 0.0001).unwrap();
        let e = (1.0 as Real).exp();
        assert!((fine - e).abs() < (coarse - e).abs());
        assert!((fine - e).abs() < 1e-3);
        assert!(fine < e, "explicit Euler underestimates a convex solution");
    }

    #[test]
    fn test_euler_rejects_bad_step() {
        assert!(euler_method(|_| 1.0, (0.0, 0.0), 1.0, 0.0).is_err());
        assert!(euler_method(|_| 1.0, (0.0, 0.0), 1.0, -0.5).is_err());
        assert!(euler_method(|_| 1.0, (0.0, 0.0), 1.0, Real::NAN).is_err());
        assert!(euler_method(|_| 1.0, (0.0, 0.0), Real::INFINITY, 0.1).is_err());
    }

    #[test]
    fn test_euler_target_before_start() {
        assert_eq!(euler_method(|_| 1.0, (1.0, 5.0), 0.0, 0.1).unwrap(), 5.0);
    }

    #[test]
    fn test_euler_system_harmonic_oscillator() {
        // x'' = -x as (x, v); energy grows slowly under explicit Euler
        let rhs = |_: Real, q: &Vector| Vector::from_slice(&[q[1], -q[0]]);
        let q0 = Vector::from_slice(&[1.0, 0.0]);
        let q = euler_method_system(rhs, 0.0, &q0, 1.0, 0.001).unwrap();
        assert!((q[0] - (1.0 as Real).cos()).abs() < 1e-3);
        assert!((q[1] + (1.0 as Real).sin()).abs() < 1e-3);
    }

    #[test]
    fn test_euler_system_shape_mismatch() {
        let rhs = |_: Real, _: &Vector| Vector::zeros(3);
        assert!(euler_method_system(rhs, 0.0, &Vector::zeros(2), 1.0, 0.5).is_err());
    }

    #[test]
    fn test_growth_method() {
        assert_eq!(growth_method(3.0, 0.0, 10.0), 3.0);
        assert!((growth_method(2.0, 1.0, 1.0) - 2.0 * (1.0 as Real).exp()).abs() < 1e-12);
    }
}
