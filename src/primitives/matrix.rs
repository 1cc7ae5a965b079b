//! Matrix type for 2D numeric data.

use super::elementwise::elementwise_methods;
use super::image::{byte_to_real, real_to_byte};
use super::{Image, ImageFormat, Vector};
use crate::error::{LaminaError, Result};
use crate::linalg::{self, CholeskyResult, EigenResult, JacobiConfig, QrResult, SvdResult};
use crate::Real;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Mul, Neg};

/// A 2D matrix of [`Real`] values (row-major storage).
///
/// # Examples
///
/// ```
/// use lamina::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2).unwrap(), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct Matrix {
    data: Vec<Real>,
    rows: usize,
    cols: usize,
}

/// Unvalidated wire form; converted through [`Matrix::from_vec`].
#[derive(Deserialize)]
struct MatrixRepr {
    data: Vec<Real>,
    rows: usize,
    cols: usize,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = LaminaError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        Self::from_vec(repr.rows, repr.cols, repr.data)
    }
}

impl Matrix {
    /// Creates an empty 0x0 matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 0.0)
    }

    /// Creates a matrix of ones.
    #[must_use]
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, 1.0)
    }

    /// Creates a matrix filled with `value`.
    #[must_use]
    pub fn full(rows: usize, cols: usize, value: Real) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Creates a new matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Real>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(LaminaError::shape_mismatch(
                format!("rows * cols elements for {rows}x{cols}"),
                format!("{} elements", data.len()),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a new matrix by copying a flat row-major slice.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if data length doesn't match rows * cols.
    pub fn from_slice(rows: usize, cols: usize, data: &[Real]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Creates a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<Real>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LaminaError::shape_mismatch(
                    format!("row {i} with {cols} columns"),
                    format!("{} columns", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Creates a matrix whose rows are the given vectors.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the vectors differ in length.
    pub fn from_vectors(rows: &[Vector]) -> Result<Self> {
        let nested: Vec<Vec<Real>> = rows.iter().map(Vector::to_vec).collect();
        Self::from_rows(&nested)
    }

    /// Creates a square matrix with `diag` on its diagonal.
    #[must_use]
    pub fn from_diagonal(diag: &Vector) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.as_slice().iter().enumerate() {
            m.data[i * n + i] = d;
        }
        m
    }

    /// Outer product `u * v^T`.
    #[must_use]
    pub fn outer_product(u: &Vector, v: &Vector) -> Self {
        let mut data = Vec::with_capacity(u.len() * v.len());
        for &a in u.as_slice() {
            data.extend(v.as_slice().iter().map(|&b| a * b));
        }
        Self {
            data,
            rows: u.len(),
            cols: v.len(),
        }
    }

    /// Creates a matrix of samples from N(0, 1).
    ///
    /// Pass a seed for reproducible output.
    #[must_use]
    pub fn gaussian_noise(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            data: (0..rows * cols)
                .map(|_| super::standard_normal(&mut rng))
                .collect(),
            rows,
            cols,
        }
    }

    /// Rotation matrix for angle `theta` (radians).
    ///
    /// `axis = None` gives the 2x2 planar rotation. `Some(0)`, `Some(1)` and `Some(2)`
    /// give the 3x3 rotation about the x, y and z axis.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an axis other than 0, 1 or 2.
    pub fn rotation(theta: Real, axis: Option<usize>) -> Result<Self> {
        let (s, c) = theta.sin_cos();
        let rows = match axis {
            None => vec![vec![c, -s], vec![s, c]],
            Some(0) => vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, c, -s],
                vec![0.0, s, c],
            ],
            Some(1) => vec![
                vec![c, 0.0, s],
                vec![0.0, 1.0, 0.0],
                vec![-s, 0.0, c],
            ],
            Some(2) => vec![
                vec![c, -s, 0.0],
                vec![s, c, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            Some(other) => {
                return Err(LaminaError::invalid_argument("axis", other, "0, 1 or 2"));
            }
        };
        Self::from_rows(&rows)
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the matrix has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if rows == cols.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the underlying row-major data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Returns the underlying row-major data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Copies the row-major data into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Real> {
        self.data.clone()
    }

    /// Copies the matrix into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Real>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[Real]>::to_vec).collect()
    }

    /// Flattens the matrix into a row-major vector.
    #[must_use]
    pub fn flatten(&self) -> Vector {
        Vector::from_slice(&self.data)
    }

    /// Reallocates to `rows x cols` zeros. Old contents are not preserved.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.data = vec![0.0; rows * cols];
        self.rows = rows;
        self.cols = cols;
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: Real) {
        self.data.fill(value);
    }

    /// Gets element at (row, col).
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<Real> {
        let i = self.checked_index(row, col)?;
        Ok(self.data[i])
    }

    /// Sets element at (row, col).
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Real) -> Result<()> {
        let i = self.checked_index(row, col)?;
        self.data[i] = value;
        Ok(())
    }

    /// Gets element at (row, col) without bounds checking.
    ///
    /// # Safety
    ///
    /// `row < n_rows()` and `col < n_cols()` must hold.
    #[must_use]
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> Real {
        *self.data.get_unchecked(row * self.cols + col)
    }

    /// Sets element at (row, col) without bounds checking.
    ///
    /// # Safety
    ///
    /// `row < n_rows()` and `col < n_cols()` must hold.
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: Real) {
        *self.data.get_unchecked_mut(row * self.cols + col) = value;
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows {
            return Err(LaminaError::index_out_of_bounds(row, self.rows));
        }
        if col >= self.cols {
            return Err(LaminaError::index_out_of_bounds(col, self.cols));
        }
        Ok(row * self.cols + col)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(LaminaError::index_out_of_bounds(row, self.rows));
        }
        Ok(())
    }

    fn check_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(LaminaError::shape_mismatch(
                "square matrix",
                format!("{}x{}", self.rows, self.cols),
            ));
        }
        Ok(())
    }

    /// Returns a row as a Vector.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `row_idx >= n_rows()`.
    pub fn row(&self, row_idx: usize) -> Result<Vector> {
        self.row_slice(row_idx).map(Vector::from_slice)
    }

    /// Borrows a row as a slice.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `row_idx >= n_rows()`.
    pub fn row_slice(&self, row_idx: usize) -> Result<&[Real]> {
        self.check_row(row_idx)?;
        let start = row_idx * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Copies a row into `out`, which must already have `n_cols()` elements.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad row or `ShapeMismatch` for a wrongly sized `out`.
    pub fn row_into(&self, row_idx: usize, out: &mut Vector) -> Result<()> {
        let row = self.row_slice(row_idx)?;
        if out.len() != self.cols {
            return Err(LaminaError::shape_mismatch(
                format!("[{}]", self.cols),
                format!("[{}]", out.len()),
            ));
        }
        out.as_mut_slice().copy_from_slice(row);
        Ok(())
    }

    /// Overwrites a row.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad row or `ShapeMismatch` for a wrongly sized `values`.
    pub fn set_row(&mut self, row_idx: usize, values: &Vector) -> Result<()> {
        self.check_row(row_idx)?;
        self.check_row_len(values)?;
        let start = row_idx * self.cols;
        self.data[start..start + self.cols].copy_from_slice(values.as_slice());
        Ok(())
    }

    fn check_row_len(&self, values: &Vector) -> Result<()> {
        if values.len() != self.cols {
            return Err(LaminaError::shape_mismatch(
                format!("row of {} elements", self.cols),
                format!("[{}]", values.len()),
            ));
        }
        Ok(())
    }

    /// Returns a column as a Vector.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `col_idx >= n_cols()`.
    pub fn column(&self, col_idx: usize) -> Result<Vector> {
        if col_idx >= self.cols {
            return Err(LaminaError::index_out_of_bounds(col_idx, self.cols));
        }
        Ok((0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect())
    }

    /// Overwrites a column.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for a bad column or `ShapeMismatch` for a wrongly sized `values`.
    pub fn set_column(&mut self, col_idx: usize, values: &Vector) -> Result<()> {
        if col_idx >= self.cols {
            return Err(LaminaError::index_out_of_bounds(col_idx, self.cols));
        }
        if values.len() != self.rows {
            return Err(LaminaError::shape_mismatch(
                format!("column of {} elements", self.rows),
                format!("[{}]", values.len()),
            ));
        }
        for (row, &v) in values.as_slice().iter().enumerate() {
            self.data[row * self.cols + col_idx] = v;
        }
        Ok(())
    }

    /// Appends a row. On an empty matrix the row fixes the column count.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the row length differs from `n_cols()`.
    pub fn row_add(&mut self, values: &Vector) -> Result<()> {
        if self.data.is_empty() && self.rows == 0 {
            self.cols = values.len();
        }
        self.check_row_len(values)?;
        self.data.extend_from_slice(values.as_slice());
        self.rows += 1;
        Ok(())
    }

    /// Appends every row of `other`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the column counts differ.
    pub fn rows_add(&mut self, other: &Matrix) -> Result<()> {
        if self.rows == 0 {
            self.cols = other.cols;
        }
        if other.cols != self.cols {
            return Err(LaminaError::shape_mismatch(
                format!("{} columns", self.cols),
                format!("{}x{}", other.rows, other.cols),
            ));
        }
        self.data.extend_from_slice(&other.data);
        self.rows += other.rows;
        Ok(())
    }

    /// Removes a row, preserving the order of the others.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `row_idx >= n_rows()`.
    pub fn row_remove(&mut self, row_idx: usize) -> Result<()> {
        self.check_row(row_idx)?;
        let start = row_idx * self.cols;
        self.data.drain(start..start + self.cols);
        self.rows -= 1;
        Ok(())
    }

    /// Removes a row by moving the last row into its place.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `row_idx >= n_rows()`.
    pub fn row_remove_unordered(&mut self, row_idx: usize) -> Result<()> {
        self.check_row(row_idx)?;
        let last = self.rows - 1;
        if row_idx != last {
            self.swap_rows_unchecked(row_idx, last);
        }
        self.data.truncate(last * self.cols);
        self.rows = last;
        Ok(())
    }

    /// Swaps two rows.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either row is out of range.
    pub fn row_swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        if a != b {
            self.swap_rows_unchecked(a, b);
        }
        Ok(())
    }

    fn swap_rows_unchecked(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        let cols = self.cols;
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..lo * cols + cols].swap_with_slice(&mut tail[..cols]);
    }

    elementwise_methods!();

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `self.n_cols() != other.n_rows()`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        let mut out = Self::zeros(self.rows, other.cols);
        self.matmul_into(other, &mut out)?;
        Ok(out)
    }

    /// Matrix-matrix multiplication into a pre-sized `rows x other.cols` output.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the inner dimensions or the output shape disagree.
    pub fn matmul_into(&self, other: &Self, out: &mut Self) -> Result<()> {
        if self.cols != other.rows {
            return Err(LaminaError::shape_mismatch(
                format!("{}x{} * {}xN", self.rows, self.cols, self.cols),
                format!("{}x{} * {}x{}", self.rows, self.cols, other.rows, other.cols),
            ));
        }
        if out.shape() != (self.rows, other.cols) {
            return Err(LaminaError::shape_mismatch(
                format!("{}x{}", self.rows, other.cols),
                format!("{}x{}", out.rows, out.cols),
            ));
        }
        out.data.fill(0.0);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let b_row = &other.data[k * other.cols..(k + 1) * other.cols];
                let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in out_row.iter_mut().zip(b_row) {
                    *o += a * b;
                }
            }
        }
        Ok(())
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `n_cols() != vec.len()`.
    pub fn mult_vec(&self, vec: &Vector) -> Result<Vector> {
        let mut out = Vector::zeros(self.rows);
        self.mult_vec_into(vec, &mut out)?;
        Ok(out)
    }

    /// Matrix-vector multiplication into a pre-sized output of `n_rows()` elements.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the vector or output lengths disagree.
    pub fn mult_vec_into(&self, vec: &Vector, out: &mut Vector) -> Result<()> {
        if self.cols != vec.len() {
            return Err(LaminaError::shape_mismatch(
                format!("vector of {} elements", self.cols),
                format!("[{}]", vec.len()),
            ));
        }
        if out.len() != self.rows {
            return Err(LaminaError::shape_mismatch(
                format!("[{}]", self.rows),
                format!("[{}]", out.len()),
            ));
        }
        for (i, o) in out.as_mut_slice().iter_mut().enumerate() {
            let row = &self.data[i * self.cols..(i + 1) * self.cols];
            *o = row.iter().zip(vec.as_slice()).map(|(a, b)| a * b).sum();
        }
        Ok(())
    }

    /// Kronecker product `self ⊗ other`.
    #[must_use]
    pub fn kronecker_product(&self, other: &Self) -> Self {
        let rows = self.rows * other.rows;
        let cols = self.cols * other.cols;
        let mut out = Self::zeros(rows, cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.data[i * self.cols + j];
                for k in 0..other.rows {
                    for l in 0..other.cols {
                        let r = i * other.rows + k;
                        let c = j * other.cols + l;
                        out.data[r * cols + c] = a * other.data[k * other.cols + l];
                    }
                }
            }
        }
        out
    }

    /// Raises a square matrix to a non-negative integer power.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn matrix_power(&self, n: u32) -> Result<Self> {
        self.check_square()?;
        let mut result = Self::identity(self.rows);
        for _ in 0..n {
            result = result.matmul(self)?;
        }
        Ok(result)
    }

    /// Adds `v` to every row.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `v.len() != n_cols()`.
    pub fn add_vec(&self, v: &Vector) -> Result<Self> {
        self.check_row_len(v)?;
        let mut out = self.clone();
        if self.cols > 0 {
            for row in out.data.chunks_mut(self.cols) {
                for (x, &b) in row.iter_mut().zip(v.as_slice()) {
                    *x += b;
                }
            }
        }
        Ok(out)
    }

    /// Rotates every row by `theta`: returns `self * R` with `R` from [`Matrix::rotation`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a bad axis and `ShapeMismatch` when the column count
    /// does not match the rotation dimension.
    pub fn rotate(&self, theta: Real, axis: Option<usize>) -> Result<Self> {
        let r = Self::rotation(theta, axis)?;
        self.matmul(&r)
    }

    /// Sum of the diagonal.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn trace(&self) -> Result<Real> {
        self.check_square()?;
        Ok((0..self.rows).map(|i| self.data[i * self.cols + i]).sum())
    }

    /// Sum of all elements.
    #[must_use]
    pub fn sum(&self) -> Real {
        self.data.iter().sum()
    }

    /// Largest element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty matrix.
    pub fn max_element(&self) -> Result<Real> {
        self.data
            .iter()
            .copied()
            .reduce(Real::max)
            .ok_or_else(|| LaminaError::empty_input("max_element"))
    }

    /// Smallest element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty matrix.
    pub fn min_element(&self) -> Result<Real> {
        self.data
            .iter()
            .copied()
            .reduce(Real::min)
            .ok_or_else(|| LaminaError::empty_input("min_element"))
    }

    /// Frobenius norm.
    #[must_use]
    pub fn norm_frobenius(&self) -> Real {
        self.data.iter().map(|x| x * x).sum::<Real>().sqrt()
    }

    /// Sample covariance between rows. Each row is one variable, each column one
    /// observation; the result is `n_rows() x n_rows()`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` with fewer than two observations.
    pub fn cov(&self) -> Result<Self> {
        if self.cols < 2 {
            return Err(LaminaError::invalid_argument(
                "observations",
                self.cols,
                "at least 2 columns",
            ));
        }
        let n = self.cols as Real;
        let means: Vec<Real> = self
            .data
            .chunks(self.cols)
            .map(|row| row.iter().sum::<Real>() / n)
            .collect();
        let mut out = Self::zeros(self.rows, self.rows);
        for i in 0..self.rows {
            for j in i..self.rows {
                let ri = &self.data[i * self.cols..(i + 1) * self.cols];
                let rj = &self.data[j * self.cols..(j + 1) * self.cols];
                let c = ri
                    .iter()
                    .zip(rj)
                    .map(|(a, b)| (a - means[i]) * (b - means[j]))
                    .sum::<Real>()
                    / (n - 1.0);
                out.data[i * self.rows + j] = c;
                out.data[j * self.rows + i] = c;
            }
        }
        Ok(out)
    }

    /// Returns the main diagonal (length `min(rows, cols)`).
    #[must_use]
    pub fn diagonal(&self) -> Vector {
        (0..self.rows.min(self.cols))
            .map(|i| self.data[i * self.cols + i])
            .collect()
    }

    /// Overwrites the main diagonal with `diag`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `diag.len() != min(rows, cols)`.
    pub fn diagonal_set(&mut self, diag: &Vector) -> Result<()> {
        let n = self.rows.min(self.cols);
        if diag.len() != n {
            return Err(LaminaError::shape_mismatch(
                format!("[{n}]"),
                format!("[{}]", diag.len()),
            ));
        }
        for (i, &d) in diag.as_slice().iter().enumerate() {
            self.data[i * self.cols + i] = d;
        }
        Ok(())
    }

    /// Returns a copy with the main diagonal set to zero.
    #[must_use]
    pub fn diagonal_zeroed(&self) -> Self {
        let mut out = self.clone();
        for i in 0..self.rows.min(self.cols) {
            out.data[i * self.cols + i] = 0.0;
        }
        out
    }

    /// Determinant by cofactor expansion.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn det(&self) -> Result<Real> {
        linalg::det(self)
    }

    /// Minor sub-matrix with row `i` and column `j` removed.
    ///
    /// # Errors
    ///
    /// See [`linalg::cofactor`].
    pub fn cofactor(&self, i: usize, j: usize) -> Result<Self> {
        linalg::cofactor(self, i, j)
    }

    /// Adjugate (transposed cofactor matrix).
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn adjoint(&self) -> Result<Self> {
        linalg::adjoint(self)
    }

    /// Inverse via adjugate / determinant.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for a non-square matrix and `SingularMatrix` when the
    /// determinant is numerically zero.
    pub fn inverse(&self) -> Result<Self> {
        linalg::inverse(self)
    }

    /// Moore-Penrose pseudo-inverse via the normal equations.
    ///
    /// # Errors
    ///
    /// Returns `SingularMatrix` when the Gram matrix is singular.
    pub fn pinverse(&self) -> Result<Self> {
        linalg::pinverse(self)
    }

    /// Symmetric eigendecomposition with the default Jacobi settings.
    ///
    /// # Errors
    ///
    /// See [`linalg::eigen`].
    pub fn eigen(&self) -> Result<EigenResult> {
        linalg::eigen(self, &JacobiConfig::default())
    }

    /// Singular value decomposition with the default Jacobi settings.
    ///
    /// # Errors
    ///
    /// See [`linalg::svd`].
    pub fn svd(&self) -> Result<SvdResult> {
        linalg::svd(self, &JacobiConfig::default())
    }

    /// QR decomposition by Gram-Schmidt.
    ///
    /// # Errors
    ///
    /// See [`linalg::qrd`].
    pub fn qrd(&self) -> Result<QrResult> {
        linalg::qrd(self)
    }

    /// Cholesky decomposition of a symmetric positive-definite matrix.
    ///
    /// # Errors
    ///
    /// See [`linalg::cholesky`].
    pub fn cholesky(&self) -> Result<CholeskyResult> {
        linalg::cholesky(self)
    }

    /// Solves `self * x = b`.
    ///
    /// # Errors
    ///
    /// See [`linalg::solve`].
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        linalg::solve(self, b)
    }

    /// Converts to a single-channel (L8) image, one pixel per element.
    #[must_use]
    pub fn to_image(&self) -> Image {
        let bytes = self.data.iter().map(|&v| real_to_byte(v)).collect();
        Image::from_bytes_unchecked(self.cols, self.rows, ImageFormat::L8, bytes)
    }

    /// Reads one channel of an image into a `height x width` matrix.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `channel` is not present in the image format.
    pub fn from_image(image: &Image, channel: usize) -> Result<Self> {
        let stride = image.format().channel_count();
        if channel >= stride {
            return Err(LaminaError::index_out_of_bounds(channel, stride));
        }
        let data = image
            .as_bytes()
            .iter()
            .skip(channel)
            .step_by(stride)
            .map(|&b| byte_to_real(b))
            .collect();
        Self::from_vec(image.height(), image.width(), data)
    }

    fn shape_matches(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    fn shape_string(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Real;

    fn index(&self, (row, col): (usize, usize)) -> &Real {
        assert!(col < self.cols, "column {col} out of bounds (len={})", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Real {
        assert!(col < self.cols, "column {col} out of bounds (len={})", self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl Mul<Real> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: Real) -> Matrix {
        self.scalar_multiply(scalar)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scalar_multiply(-1.0)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Matrix: {}x{}", self.rows, self.cols)?;
        for row in self.to_rows() {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "  [{}]", cells.join(", "))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_matrix_contract.rs"]
mod tests_matrix_contract;
