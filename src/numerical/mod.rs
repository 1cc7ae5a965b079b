//! Finite-difference calculus and simple iterative solvers.
//!
//! Everything here is a best-effort approximation built from forward differences
//! with fixed step sizes, chosen per precision of [`Real`](crate::Real):
//!
//! | Order | Step (`f64`) | Step (`f32` feature) |
//! |-------|--------------|----------------------|
//! | first derivative | `1e-10` | `1e-3` |
//! | second and third derivative | `1e-5` | `1e-2` |
//!
//! Callables are plain closures (`Fn(Real) -> Real` for scalar functions and
//! `Fn(&Vector) -> Real` for multivariate ones), so captured state needs no globals.
//! The root finders run for a caller-chosen number of epochs; division by a
//! vanishing derivative is not guarded and shows up as `inf` or `NaN`.
//!
//! # Example
//!
//! ```
//! use lamina::numerical::{newton_raphson, num_diff, IterationConfig};
//! use lamina::Real;
//!
//! let slope = num_diff(|x: Real| x.sin(), 0.0);
//! assert!((slope - 1.0).abs() < 1e-4);
//!
//! let root = newton_raphson(|x: Real| x * x - 2.0, 1.0, &IterationConfig::new(20));
//! assert!((root - (2.0 as Real).sqrt()).abs() < 1e-4);
//! ```

mod derivative;
mod extremum;
mod ode;
mod roots;
mod taylor;

pub use derivative::{
    hessian, jacobian, laplacian, num_diff, num_diff_2, num_diff_2v, num_diff_3, num_diff_3v,
    num_diffv, third_order_tensor,
};
pub use extremum::{second_partial_derivative_test, Extremum};
pub use ode::{euler_method, euler_method_system, euler_method_v, growth_method};
pub use roots::{halley, inverse_quadratic_interpolation, newton_raphson, IterationConfig};
pub use taylor::{
    constant_approximation, constant_approximation_v, cubic_approximation, cubic_approximation_v,
    linear_approximation, linear_approximation_v, quadratic_approximation,
    quadratic_approximation_v,
};
