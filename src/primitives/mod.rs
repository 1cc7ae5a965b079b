//! Core containers (Vector, Matrix, Tensor3) and the byte image buffer.
//!
//! Every numerical routine in the crate reads and writes these types.

mod elementwise;
mod image;
mod matrix;
mod tensor3;
mod vector;

pub use image::{Image, ImageChannels, ImageFormat};
pub use matrix::Matrix;
pub use tensor3::Tensor3;
pub use vector::Vector;

pub(crate) use vector::standard_normal;
