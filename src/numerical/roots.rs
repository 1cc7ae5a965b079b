//! Fixed-epoch root finders: Newton-Raphson, Halley and inverse quadratic interpolation.

use super::derivative::{num_diff, num_diff_2};
use crate::Real;
use serde::{Deserialize, Serialize};

/// Iteration budget shared by the root finders.
///
/// Without a tolerance every epoch runs, so results are reproducible for a given
/// epoch count. With [`with_tolerance`](Self::with_tolerance) the iteration also stops
/// as soon as `|f(x)| <= tolerance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationConfig {
    /// Number of update steps to run.
    pub epochs: usize,
    /// Optional early-exit threshold on `|f(x)|`.
    pub tolerance: Option<Real>,
}

impl IterationConfig {
    /// Fixed budget of `epochs` steps with no early exit.
    #[must_use]
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            tolerance: None,
        }
    }

    /// Stops once `|f(x)| <= tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Runs `step` up to `config.epochs` times from `x0`.
fn iterate<F, S>(f: &F, x0: Real, config: &IterationConfig, method: &str, step: S) -> Real
where
    F: Fn(Real) -> Real,
    S: Fn(Real) -> Real,
{
    let mut x = x0;
    for epoch in 0..config.epochs {
        // f is only evaluated for the convergence check when a tolerance is set
        if let Some(tol) = config.tolerance {
            if f(x).abs() <= tol {
                tracing::debug!(method = method, epoch = epoch, x = x, "root finder converged");
                return x;
            }
        }
        x = step(x);
    }
    tracing::debug!(method = method, epochs = config.epochs, x = x, "root finder finished");
    x
}

/// Newton-Raphson iteration `x ← x - f(x) / f'(x)` with a numerical derivative.
pub fn newton_raphson<F: Fn(Real) -> Real>(f: F, x0: Real, config: &IterationConfig) -> Real {
    iterate(&f, x0, config, "newton_raphson", |x| x - f(x) / num_diff(&f, x))
}

/// Halley's method, `x ← x - 2 f f' / (2 f'² - f f'')`.
pub fn halley<F: Fn(Real) -> Real>(f: F, x0: Real, config: &IterationConfig) -> Real {
    iterate(&f, x0, config, "halley", |x| {
        let fx = f(x);
        let d1 = num_diff(&f, x);
        let d2 = num_diff_2(&f, x);
        x - (2.0 * fx * d1) / (2.0 * d1 * d1 - fx * d2)
    })
}

/// Inverse quadratic interpolation over a sliding window of three points.
///
/// Each epoch fits `x` as a quadratic in `f(x)` through the window, evaluates it at
/// zero, then drops the oldest point and appends the estimate. Once two window
/// points share a function value the update divides by zero, so a long fixed budget
/// past convergence yields `NaN`; use a tolerance to stop first.
pub fn inverse_quadratic_interpolation<F: Fn(Real) -> Real>(
    f: F,
    window: [Real; 3],
    config: &IterationConfig,
) -> Real {
    let mut pts = window;
    let mut x = 0.0;
    for epoch in 0..config.epochs {
        let [a, b, c] = pts;
        let (fa, fb, fc) = (f(a), f(b), f(c));
        x = fb * fc / ((fa - fb) * (fa - fc)) * a
            + fa * fc / ((fb - fa) * (fb - fc)) * b
            + fa * fb / ((fc - fa) * (fc - fb)) * c;
        pts = [b, c, x];
        if let Some(tol) = config.tolerance {
            if f(x).abs() <= tol {
                tracing::debug!(
                    method = "inverse_quadratic_interpolation",
                    epoch = epoch + 1,
                    x = x,
                    "root finder converged"
                );
                return x;
            }
        }
    }
    tracing::debug!(
        method = "inverse_quadratic_interpolation",
        epochs = config.epochs,
        x = x,
        "root finder finished"
    );
    x
}
