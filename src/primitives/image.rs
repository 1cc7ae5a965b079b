//! Byte image buffer used to move matrices and feature maps in and out of pixel data.
//!
//! Pixels are stored row-major with interleaved channels. Real values map to bytes as
//! `clamp(v, 0, 1) * 255` (truncated) and bytes map back as `b / 255`.

use crate::error::{LaminaError, Result};
use crate::Real;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Pixel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// One 8-bit luminance channel.
    L8,
    /// Four interleaved 8-bit channels.
    Rgba8,
}

impl ImageFormat {
    /// Bytes per pixel.
    #[must_use]
    pub fn channel_count(self) -> usize {
        match self {
            Self::L8 => 1,
            Self::Rgba8 => 4,
        }
    }
}

/// Bit mask selecting image channels.
///
/// # Examples
///
/// ```
/// use lamina::primitives::ImageChannels;
///
/// let rg = ImageChannels::R | ImageChannels::G;
/// assert!(rg.contains(ImageChannels::G));
/// assert_eq!(rg.indices(), vec![0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageChannels(u8);

impl ImageChannels {
    /// Red (channel 0; the luminance channel of an L8 image).
    pub const R: Self = Self(1);
    /// Green (channel 1).
    pub const G: Self = Self(1 << 1);
    /// Blue (channel 2).
    pub const B: Self = Self(1 << 2);
    /// Alpha (channel 3).
    pub const A: Self = Self(1 << 3);
    /// Red, green and blue.
    pub const RGB: Self = Self(0b0111);
    /// All four channels.
    pub const RGBA: Self = Self(0b1111);

    /// Returns true if every channel in `other` is selected.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Selected channel indices in ascending order.
    #[must_use]
    pub fn indices(self) -> Vec<usize> {
        (0..4).filter(|i| self.0 & (1 << i) != 0).collect()
    }
}

impl BitOr for ImageChannels {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An 8-bit image of `width x height` pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ImageRepr")]
pub struct Image {
    width: usize,
    height: usize,
    format: ImageFormat,
    data: Vec<u8>,
}

/// Unvalidated wire form; converted through [`Image::from_bytes`].
#[derive(Deserialize)]
struct ImageRepr {
    width: usize,
    height: usize,
    format: ImageFormat,
    data: Vec<u8>,
}

impl TryFrom<ImageRepr> for Image {
    type Error = LaminaError;

    fn try_from(repr: ImageRepr) -> Result<Self> {
        Self::from_bytes(repr.width, repr.height, repr.format, repr.data)
    }
}

impl Image {
    /// Creates a black image.
    #[must_use]
    pub fn new(width: usize, height: usize, format: ImageFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; width * height * format.channel_count()],
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the buffer length is not `width * height * channels`.
    pub fn from_bytes(
        width: usize,
        height: usize,
        format: ImageFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(format.channel_count()));
        if expected != Some(data.len()) {
            return Err(LaminaError::shape_mismatch(
                format!("width * height * channels bytes for {width}x{height} {format:?}"),
                format!("{} bytes", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub(crate) fn from_bytes_unchecked(
        width: usize,
        height: usize,
        format: ImageFormat,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * format.channel_count());
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel layout.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw interleaved pixel bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reads one channel of one pixel.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the pixel or channel is out of range.
    pub fn pixel(&self, x: usize, y: usize, channel: usize) -> Result<u8> {
        let i = self.byte_index(x, y, channel)?;
        Ok(self.data[i])
    }

    /// Writes one channel of one pixel.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the pixel or channel is out of range.
    pub fn set_pixel(&mut self, x: usize, y: usize, channel: usize, value: u8) -> Result<()> {
        let i = self.byte_index(x, y, channel)?;
        self.data[i] = value;
        Ok(())
    }

    fn byte_index(&self, x: usize, y: usize, channel: usize) -> Result<usize> {
        let stride = self.format.channel_count();
        if x >= self.width {
            return Err(LaminaError::index_out_of_bounds(x, self.width));
        }
        if y >= self.height {
            return Err(LaminaError::index_out_of_bounds(y, self.height));
        }
        if channel >= stride {
            return Err(LaminaError::index_out_of_bounds(channel, stride));
        }
        Ok((y * self.width + x) * stride + channel)
    }
}

/// Maps a real in `[0, 1]` to a byte; values outside are clamped, NaN maps to 0.
pub(crate) fn real_to_byte(v: Real) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

pub(crate) fn byte_to_real(b: u8) -> Real {
    Real::from(b) / 255.0
}
