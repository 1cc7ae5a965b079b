//! Rank-3 tensor stored as a stack of equally shaped feature maps.

use super::elementwise::elementwise_methods;
use super::image::{byte_to_real, real_to_byte};
use super::{Image, ImageChannels, ImageFormat, Matrix, Vector};
use crate::error::{LaminaError, Result};
use crate::Real;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A dense `Z x Y x X` tensor: `Z` feature maps of `Y` rows and `X` columns.
///
/// Storage is one contiguous buffer with the feature-map index varying slowest, so
/// each feature map is a contiguous row-major block.
///
/// # Examples
///
/// ```
/// use lamina::primitives::{Matrix, Tensor3};
///
/// let mut t = Tensor3::zeros(0, 2, 2);
/// t.add_feature_map(&Matrix::identity(2)).unwrap();
/// t.add_feature_map(&Matrix::ones(2, 2)).unwrap();
/// assert_eq!(t.shape(), (2, 2, 2));
/// assert_eq!(t.get(1, 0, 1).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Tensor3Repr")]
pub struct Tensor3 {
    data: Vec<Real>,
    feature_maps: usize,
    rows: usize,
    cols: usize,
}

/// Unvalidated wire form; converted through [`Tensor3::from_vec`].
#[derive(Deserialize)]
struct Tensor3Repr {
    data: Vec<Real>,
    feature_maps: usize,
    rows: usize,
    cols: usize,
}

impl TryFrom<Tensor3Repr> for Tensor3 {
    type Error = LaminaError;

    fn try_from(repr: Tensor3Repr) -> Result<Self> {
        Self::from_vec(repr.feature_maps, repr.rows, repr.cols, repr.data)
    }
}

impl Tensor3 {
    /// Creates a zero tensor of `feature_maps x rows x cols`.
    #[must_use]
    pub fn zeros(feature_maps: usize, rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; feature_maps * rows * cols],
            feature_maps,
            rows,
            cols,
        }
    }

    /// Wraps a flat buffer laid out feature map by feature map, each row-major.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the buffer length is not `feature_maps * rows * cols`.
    pub fn from_vec(
        feature_maps: usize,
        rows: usize,
        cols: usize,
        data: Vec<Real>,
    ) -> Result<Self> {
        let expected = feature_maps.checked_mul(rows).and_then(|n| n.checked_mul(cols));
        if expected != Some(data.len()) {
            return Err(LaminaError::shape_mismatch(
                format!("Z * Y * X elements for {feature_maps}x{rows}x{cols}"),
                format!("{} elements", data.len()),
            ));
        }
        Ok(Self {
            data,
            feature_maps,
            rows,
            cols,
        })
    }

    /// Stacks equally shaped matrices as feature maps.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrices differ in shape.
    pub fn from_matrices(maps: &[Matrix]) -> Result<Self> {
        let (rows, cols) = maps.first().map_or((0, 0), Matrix::shape);
        let mut t = Self::zeros(0, rows, cols);
        for m in maps {
            t.add_feature_map(m)?;
        }
        Ok(t)
    }

    /// Builds a tensor from `[feature_map][row][col]` nested data.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if any level is ragged.
    pub fn from_nested(nested: &[Vec<Vec<Real>>]) -> Result<Self> {
        let maps = nested
            .iter()
            .map(|rows| Matrix::from_rows(rows))
            .collect::<Result<Vec<_>>>()?;
        Self::from_matrices(&maps)
    }

    /// Creates one feature map per selected image channel.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if a selected channel is absent from the image format.
    pub fn from_image(image: &Image, channels: ImageChannels) -> Result<Self> {
        let mut t = Self::zeros(0, image.height(), image.width());
        t.add_image_channels(image, channels)?;
        Ok(t)
    }

    /// Returns the shape as `(feature_maps, rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.feature_maps, self.rows, self.cols)
    }

    /// Number of feature maps (Z).
    #[must_use]
    pub fn feature_map_count(&self) -> usize {
        self.feature_maps
    }

    /// Rows per feature map (Y).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Columns per feature map (X).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the underlying buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Returns the underlying buffer mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }

    fn map_len(&self) -> usize {
        self.rows * self.cols
    }

    fn checked_index(&self, z: usize, y: usize, x: usize) -> Result<usize> {
        self.check_feature_map(z)?;
        if y >= self.rows {
            return Err(LaminaError::index_out_of_bounds(y, self.rows));
        }
        if x >= self.cols {
            return Err(LaminaError::index_out_of_bounds(x, self.cols));
        }
        Ok(z * self.map_len() + y * self.cols + x)
    }

    fn check_feature_map(&self, z: usize) -> Result<()> {
        if z >= self.feature_maps {
            return Err(LaminaError::index_out_of_bounds(z, self.feature_maps));
        }
        Ok(())
    }

    fn check_map_shape(&self, m: &Matrix) -> Result<()> {
        if m.shape() != (self.rows, self.cols) {
            return Err(LaminaError::shape_mismatch(
                format!("{}x{} feature map", self.rows, self.cols),
                format!("{}x{}", m.n_rows(), m.n_cols()),
            ));
        }
        Ok(())
    }

    /// Gets element `(z, y, x)`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if any index is out of range.
    pub fn get(&self, z: usize, y: usize, x: usize) -> Result<Real> {
        let i = self.checked_index(z, y, x)?;
        Ok(self.data[i])
    }

    /// Sets element `(z, y, x)`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if any index is out of range.
    pub fn set(&mut self, z: usize, y: usize, x: usize, value: Real) -> Result<()> {
        let i = self.checked_index(z, y, x)?;
        self.data[i] = value;
        Ok(())
    }

    /// Gets element `(z, y, x)` without bounds checking.
    ///
    /// # Safety
    ///
    /// All three indices must be within the tensor shape.
    #[must_use]
    pub unsafe fn get_unchecked(&self, z: usize, y: usize, x: usize) -> Real {
        *self
            .data
            .get_unchecked(z * self.map_len() + y * self.cols + x)
    }

    /// Sets element `(z, y, x)` without bounds checking.
    ///
    /// # Safety
    ///
    /// All three indices must be within the tensor shape.
    pub unsafe fn set_unchecked(&mut self, z: usize, y: usize, x: usize, value: Real) {
        let i = z * self.map_len() + y * self.cols + x;
        *self.data.get_unchecked_mut(i) = value;
    }

    /// Copies feature map `z` into a matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `z` is out of range.
    pub fn feature_map(&self, z: usize) -> Result<Matrix> {
        Matrix::from_slice(self.rows, self.cols, self.feature_map_slice(z)?)
    }

    /// Borrows feature map `z` as a row-major slice.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `z` is out of range.
    pub fn feature_map_slice(&self, z: usize) -> Result<&[Real]> {
        self.check_feature_map(z)?;
        let len = self.map_len();
        Ok(&self.data[z * len..(z + 1) * len])
    }

    /// Copies feature map `z` into a pre-sized matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad `z` or `ShapeMismatch` for a wrongly sized `out`.
    pub fn feature_map_into(&self, z: usize, out: &mut Matrix) -> Result<()> {
        let src = self.feature_map_slice(z)?;
        self.check_map_shape(out)?;
        out.as_mut_slice().copy_from_slice(src);
        Ok(())
    }

    /// Overwrites feature map `z`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad `z` or `ShapeMismatch` for a wrongly shaped map.
    pub fn set_feature_map(&mut self, z: usize, map: &Matrix) -> Result<()> {
        self.check_feature_map(z)?;
        self.check_map_shape(map)?;
        let len = self.map_len();
        self.data[z * len..(z + 1) * len].copy_from_slice(map.as_slice());
        Ok(())
    }

    /// Appends a feature map. A tensor without feature maps adopts the map's shape.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the map shape differs from the existing feature maps.
    pub fn add_feature_map(&mut self, map: &Matrix) -> Result<()> {
        if self.feature_maps == 0 {
            self.rows = map.n_rows();
            self.cols = map.n_cols();
        }
        self.check_map_shape(map)?;
        self.data.extend_from_slice(map.as_slice());
        self.feature_maps += 1;
        Ok(())
    }

    /// Removes feature map `z`, preserving the order of the others.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `z` is out of range.
    pub fn remove_feature_map(&mut self, z: usize) -> Result<()> {
        self.check_feature_map(z)?;
        let len = self.map_len();
        self.data.drain(z * len..(z + 1) * len);
        self.feature_maps -= 1;
        Ok(())
    }

    /// Removes feature map `z` by moving the last feature map into its place.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `z` is out of range.
    pub fn remove_feature_map_unordered(&mut self, z: usize) -> Result<()> {
        self.check_feature_map(z)?;
        let last = self.feature_maps - 1;
        if z != last {
            self.swap_feature_maps(z, last)?;
        }
        self.data.truncate(last * self.map_len());
        self.feature_maps = last;
        Ok(())
    }

    /// Swaps two feature maps.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either index is out of range.
    pub fn swap_feature_maps(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_feature_map(a)?;
        self.check_feature_map(b)?;
        if a == b {
            return Ok(());
        }
        let len = self.map_len();
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.data.split_at_mut(hi * len);
        head[lo * len..(lo + 1) * len].swap_with_slice(&mut tail[..len]);
        Ok(())
    }

    /// Appends one feature map per selected image channel, in channel order.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if a selected channel is absent from the image format,
    /// or `ShapeMismatch` if the image size differs from the feature map shape.
    pub fn add_image_channels(&mut self, image: &Image, channels: ImageChannels) -> Result<()> {
        let maps = channels
            .indices()
            .into_iter()
            .map(|c| Matrix::from_image(image, c))
            .collect::<Result<Vec<_>>>()?;
        if self.feature_maps > 0 && !maps.is_empty() {
            self.check_map_shape(&maps[0])?;
        }
        for m in &maps {
            self.add_feature_map(m)?;
        }
        Ok(())
    }

    /// Matrix of shape `Z x Y` holding `row(z, y) . x` at each position.
    ///
    /// This is how a third-order derivative tensor is contracted with a displacement.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `v.len() != n_cols()`.
    pub fn tensor_vec_mult(&self, v: &Vector) -> Result<Matrix> {
        if v.len() != self.cols {
            return Err(LaminaError::shape_mismatch(
                format!("vector of {} elements", self.cols),
                format!("[{}]", v.len()),
            ));
        }
        let mut out = Matrix::zeros(self.feature_maps, self.rows);
        let out_data = out.as_mut_slice();
        if self.cols > 0 {
            for (i, row) in self.data.chunks(self.cols).enumerate() {
                out_data[i] = row.iter().zip(v.as_slice()).map(|(a, b)| a * b).sum();
            }
        }
        Ok(out)
    }

    /// Returns row `y` of feature map `z`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either index is out of range.
    pub fn row(&self, z: usize, y: usize) -> Result<Vector> {
        let start = self.row_start(z, y)?;
        Ok(Vector::from_slice(&self.data[start..start + self.cols]))
    }

    /// Overwrites row `y` of feature map `z`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for bad indices or `ShapeMismatch` for a wrongly sized row.
    pub fn set_row(&mut self, z: usize, y: usize, values: &Vector) -> Result<()> {
        let start = self.row_start(z, y)?;
        if values.len() != self.cols {
            return Err(LaminaError::shape_mismatch(
                format!("[{}]", self.cols),
                format!("[{}]", values.len()),
            ));
        }
        self.data[start..start + self.cols].copy_from_slice(values.as_slice());
        Ok(())
    }

    fn row_start(&self, z: usize, y: usize) -> Result<usize> {
        self.check_feature_map(z)?;
        if y >= self.rows {
            return Err(LaminaError::index_out_of_bounds(y, self.rows));
        }
        Ok(z * self.map_len() + y * self.cols)
    }

    /// Slice at fixed column `x`: a `Z x Y` matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `x >= n_cols()`.
    pub fn x_slice(&self, x: usize) -> Result<Matrix> {
        if x >= self.cols {
            return Err(LaminaError::index_out_of_bounds(x, self.cols));
        }
        let mut out = Matrix::zeros(self.feature_maps, self.rows);
        for z in 0..self.feature_maps {
            for y in 0..self.rows {
                out[(z, y)] = self.data[z * self.map_len() + y * self.cols + x];
            }
        }
        Ok(out)
    }

    /// Overwrites the slice at fixed column `x` from a `Z x Y` matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad `x` or `ShapeMismatch` for a wrongly shaped slice.
    pub fn set_x_slice(&mut self, x: usize, slice: &Matrix) -> Result<()> {
        if x >= self.cols {
            return Err(LaminaError::index_out_of_bounds(x, self.cols));
        }
        if slice.shape() != (self.feature_maps, self.rows) {
            return Err(LaminaError::shape_mismatch(
                format!("{}x{}", self.feature_maps, self.rows),
                format!("{}x{}", slice.n_rows(), slice.n_cols()),
            ));
        }
        let map_len = self.map_len();
        for z in 0..self.feature_maps {
            for y in 0..self.rows {
                self.data[z * map_len + y * self.cols + x] = slice[(z, y)];
            }
        }
        Ok(())
    }

    /// Slice at fixed row `y`: a `Z x X` matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `y >= n_rows()`.
    pub fn y_slice(&self, y: usize) -> Result<Matrix> {
        if y >= self.rows {
            return Err(LaminaError::index_out_of_bounds(y, self.rows));
        }
        let mut data = Vec::with_capacity(self.feature_maps * self.cols);
        for z in 0..self.feature_maps {
            let start = z * self.map_len() + y * self.cols;
            data.extend_from_slice(&self.data[start..start + self.cols]);
        }
        Matrix::from_vec(self.feature_maps, self.cols, data)
    }

    /// Overwrites the slice at fixed row `y` from a `Z x X` matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad `y` or `ShapeMismatch` for a wrongly shaped slice.
    pub fn set_y_slice(&mut self, y: usize, slice: &Matrix) -> Result<()> {
        if y >= self.rows {
            return Err(LaminaError::index_out_of_bounds(y, self.rows));
        }
        if slice.shape() != (self.feature_maps, self.cols) {
            return Err(LaminaError::shape_mismatch(
                format!("{}x{}", self.feature_maps, self.cols),
                format!("{}x{}", slice.n_rows(), slice.n_cols()),
            ));
        }
        for z in 0..self.feature_maps {
            let start = z * self.map_len() + y * self.cols;
            self.data[start..start + self.cols].copy_from_slice(slice.row_slice(z)?);
        }
        Ok(())
    }

    /// Flattens every element into one vector.
    #[must_use]
    pub fn flatten(&self) -> Vector {
        Vector::from_slice(&self.data)
    }

    /// One row per feature map, each row the flattened map: a `Z x (Y*X)` matrix.
    #[must_use]
    pub fn flatten_feature_maps(&self) -> Matrix {
        Matrix::from_slice(self.feature_maps, self.map_len(), &self.data)
            .unwrap_or_else(|_| Matrix::zeros(self.feature_maps, self.map_len()))
    }

    /// Exports feature map `z` as a single-channel image.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `z` is out of range.
    pub fn feature_map_to_image(&self, z: usize) -> Result<Image> {
        Ok(self.feature_map(z)?.to_image())
    }

    /// Exports up to four feature maps as the R, G, B and A channels of one image.
    ///
    /// `None` leaves a colour channel black; a missing alpha channel is fully opaque.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if a requested feature map does not exist.
    pub fn feature_maps_to_image(&self, maps: [Option<usize>; 4]) -> Result<Image> {
        let mut bytes = vec![0u8; self.map_len() * 4];
        for (channel, map) in maps.iter().enumerate() {
            match map {
                Some(z) => {
                    let src = self.feature_map_slice(*z)?;
                    for (px, &v) in src.iter().enumerate() {
                        bytes[px * 4 + channel] = real_to_byte(v);
                    }
                }
                None if channel == 3 => {
                    for px in 0..self.map_len() {
                        bytes[px * 4 + 3] = u8::MAX;
                    }
                }
                None => {}
            }
        }
        Image::from_bytes(self.cols, self.rows, ImageFormat::Rgba8, bytes)
    }

    /// Overwrites feature map `z` from one channel of an image.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad `z` or channel, and `ShapeMismatch` when the
    /// image size differs from the feature map shape.
    pub fn set_feature_map_from_image(
        &mut self,
        z: usize,
        image: &Image,
        channel: usize,
    ) -> Result<()> {
        self.check_feature_map(z)?;
        if (image.height(), image.width()) != (self.rows, self.cols) {
            return Err(LaminaError::shape_mismatch(
                format!("{}x{} image", self.cols, self.rows),
                format!("{}x{}", image.width(), image.height()),
            ));
        }
        let stride = image.format().channel_count();
        if channel >= stride {
            return Err(LaminaError::index_out_of_bounds(channel, stride));
        }
        let len = self.map_len();
        let dst = &mut self.data[z * len..(z + 1) * len];
        for (d, &b) in dst
            .iter_mut()
            .zip(image.as_bytes().iter().skip(channel).step_by(stride))
        {
            *d = byte_to_real(b);
        }
        Ok(())
    }

    elementwise_methods!();

    fn shape_matches(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    fn shape_string(&self) -> String {
        format!("{}x{}x{}", self.feature_maps, self.rows, self.cols)
    }
}

impl Index<(usize, usize, usize)> for Tensor3 {
    type Output = Real;

    fn index(&self, (z, y, x): (usize, usize, usize)) -> &Real {
        assert!(
            y < self.rows && x < self.cols,
            "index ({z}, {y}, {x}) out of bounds for {}",
            self.shape_string()
        );
        &self.data[z * self.map_len() + y * self.cols + x]
    }
}

impl IndexMut<(usize, usize, usize)> for Tensor3 {
    fn index_mut(&mut self, (z, y, x): (usize, usize, usize)) -> &mut Real {
        assert!(
            y < self.rows && x < self.cols,
            "index ({z}, {y}, {x}) out of bounds for {}",
            self.shape_string()
        );
        let i = z * self.map_len() + y * self.cols + x;
        &mut self.data[i]
    }
}

impl fmt::Display for Tensor3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Tensor3: {}", self.shape_string())?;
        for z in 0..self.feature_maps {
            writeln!(f, "  feature map {z}:")?;
            let len = self.map_len();
            let map = &self.data[z * len..(z + 1) * len];
            if self.cols > 0 {
                for row in map.chunks(self.cols) {
                    let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                    writeln!(f, "    [{}]", cells.join(", "))?;
                }
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "tensor3_tests.rs"]
mod tests;
