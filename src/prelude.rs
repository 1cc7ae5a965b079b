//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use lamina::prelude::*;
//! ```

pub use crate::error::{LaminaError, Result};
pub use crate::linalg::{CholeskyResult, EigenResult, JacobiConfig, QrResult, SvdResult};
pub use crate::numerical::{Extremum, IterationConfig};
pub use crate::primitives::{Image, ImageChannels, ImageFormat, Matrix, Tensor3, Vector};
pub use crate::{Real, CMP_EPSILON};
