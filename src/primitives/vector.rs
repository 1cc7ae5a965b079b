//! Vector type for 1D numeric data.

use super::elementwise::elementwise_methods;
use super::Matrix;
use crate::error::{LaminaError, Result};
use crate::Real;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Mul, Neg};

/// A dense 1D vector of [`Real`] values.
///
/// # Examples
///
/// ```
/// use lamina::primitives::Vector;
///
/// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
/// assert_eq!(a.dot(&b).unwrap(), 32.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<Real>,
}

impl Vector {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates a vector of `n` zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self::full(n, 0.0)
    }

    /// Creates a vector of `n` ones.
    #[must_use]
    pub fn ones(n: usize) -> Self {
        Self::full(n, 1.0)
    }

    /// Creates a vector of `n` copies of `value`.
    #[must_use]
    pub fn full(n: usize, value: Real) -> Self {
        Self {
            data: vec![value; n],
        }
    }

    /// Creates a vector taking ownership of `data`.
    #[must_use]
    pub fn from_vec(data: Vec<Real>) -> Self {
        Self { data }
    }

    /// Creates a vector by copying a slice.
    #[must_use]
    pub fn from_slice(data: &[Real]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Creates a vector of `n` samples from N(0, 1).
    ///
    /// Pass a seed for reproducible output.
    #[must_use]
    pub fn gaussian_noise(n: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            data: (0..n).map(|_| standard_normal(&mut rng)).collect(),
        }
    }

    /// Concatenates a list of vectors into one.
    #[must_use]
    pub fn concat(vectors: &[Vector]) -> Self {
        let total = vectors.iter().map(Vector::len).sum();
        let mut data = Vec::with_capacity(total);
        for v in vectors {
            data.extend_from_slice(&v.data);
        }
        Self { data }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Returns the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Copies the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Real> {
        self.data.clone()
    }

    /// Consumes the vector, returning its buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<Real> {
        self.data
    }

    /// Gets the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len`.
    pub fn get(&self, index: usize) -> Result<Real> {
        self.data
            .get(index)
            .copied()
            .ok_or_else(|| LaminaError::index_out_of_bounds(index, self.data.len()))
    }

    /// Sets the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len`.
    pub fn set(&mut self, index: usize, value: Real) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| LaminaError::index_out_of_bounds(index, len))?;
        *slot = value;
        Ok(())
    }

    /// Gets the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> Real {
        *self.data.get_unchecked(index)
    }

    /// Sets the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    pub unsafe fn set_unchecked(&mut self, index: usize, value: Real) {
        *self.data.get_unchecked_mut(index) = value;
    }

    /// Appends an element.
    pub fn push(&mut self, value: Real) {
        self.data.push(value);
    }

    /// Appends every element of `other`.
    pub fn append(&mut self, other: &Vector) {
        self.data.extend_from_slice(&other.data);
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index > len`.
    pub fn insert(&mut self, index: usize, value: Real) -> Result<()> {
        if index > self.data.len() {
            return Err(LaminaError::index_out_of_bounds(index, self.data.len()));
        }
        self.data.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<Real> {
        if index >= self.data.len() {
            return Err(LaminaError::index_out_of_bounds(index, self.data.len()));
        }
        Ok(self.data.remove(index))
    }

    /// Removes the element at `index` by moving the last element into its slot.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len`.
    pub fn remove_unordered(&mut self, index: usize) -> Result<Real> {
        if index >= self.data.len() {
            return Err(LaminaError::index_out_of_bounds(index, self.data.len()));
        }
        Ok(self.data.swap_remove(index))
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn erase(&mut self, value: Real) -> bool {
        match self.find(value, 0) {
            Some(i) => {
                self.data.remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes every element equal to `value` without preserving order.
    /// Returns the number of removed elements.
    pub fn erase_all_unordered(&mut self, value: Real) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.data.len() {
            if self.data[i] == value {
                self.data.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }

    /// Resizes to `n` elements; new slots are zero.
    pub fn resize(&mut self, n: usize) {
        self.data.resize(n, 0.0);
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: Real) {
        self.data.fill(value);
    }

    /// Returns the index of the first element equal to `value` at or after `from`.
    #[must_use]
    pub fn find(&self, value: Real, from: usize) -> Option<usize> {
        self.data
            .iter()
            .skip(from)
            .position(|&x| x == value)
            .map(|i| i + from)
    }

    /// Sorts ascending (NaN sorts last).
    pub fn sort(&mut self) {
        self.data.sort_by(Real::total_cmp);
    }

    /// Inserts `value` keeping an ascending vector sorted.
    pub fn ordered_insert(&mut self, value: Real) {
        let pos = self.data.partition_point(|&x| x < value);
        self.data.insert(pos, value);
    }

    /// Reverses the element order.
    pub fn reverse(&mut self) {
        self.data.reverse();
    }

    elementwise_methods!();

    /// Dot product.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if lengths differ.
    pub fn dot(&self, other: &Vector) -> Result<Real> {
        self.check_shape(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Cross product of two 3-vectors.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` unless both vectors have length 3.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        if self.len() != 3 || other.len() != 3 {
            return Err(LaminaError::shape_mismatch(
                "[3] x [3]",
                format!("[{}] x [{}]", self.len(), other.len()),
            ));
        }
        let (a, b) = (&self.data, &other.data);
        Ok(Vector::from_vec(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Sum of all elements.
    #[must_use]
    pub fn sum(&self) -> Real {
        self.data.iter().sum()
    }

    /// Arithmetic mean; zero for an empty vector.
    #[must_use]
    pub fn mean(&self) -> Real {
        if self.data.is_empty() {
            return 0.0;
        }
        self.sum() / self.data.len() as Real
    }

    /// Largest element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty vector.
    pub fn max_element(&self) -> Result<Real> {
        self.max_element_index().map(|i| self.data[i])
    }

    /// Index of the first largest element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty vector.
    pub fn max_element_index(&self) -> Result<usize> {
        self.extreme_index("max_element", |candidate, best| candidate > best)
    }

    /// Smallest element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty vector.
    pub fn min_element(&self) -> Result<Real> {
        self.min_element_index().map(|i| self.data[i])
    }

    /// Index of the first smallest element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty vector.
    pub fn min_element_index(&self) -> Result<usize> {
        self.extreme_index("min_element", |candidate, best| candidate < best)
    }

    fn extreme_index(&self, context: &str, better: impl Fn(Real, Real) -> bool) -> Result<usize> {
        if self.data.is_empty() {
            return Err(LaminaError::empty_input(context));
        }
        let mut best = 0;
        for (i, &x) in self.data.iter().enumerate().skip(1) {
            if better(x, self.data[best]) {
                best = i;
            }
        }
        Ok(best)
    }

    /// Euclidean (L2) norm.
    #[must_use]
    pub fn norm_2(&self) -> Real {
        self.norm_sq().sqrt()
    }

    /// Squared Euclidean norm.
    #[must_use]
    pub fn norm_sq(&self) -> Real {
        self.data.iter().map(|x| x * x).sum()
    }

    /// Euclidean distance to `other`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if lengths differ.
    pub fn euclidean_distance(&self, other: &Vector) -> Result<Real> {
        self.euclidean_distance_squared(other).map(Real::sqrt)
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if lengths differ.
    pub fn euclidean_distance_squared(&self, other: &Vector) -> Result<Real> {
        self.check_shape(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum())
    }

    /// Cosine of the angle between `self` and `other`, `a·b / (‖a‖ ‖b‖)`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if lengths differ and `InvalidArgument` if either
    /// vector has zero norm.
    pub fn cosine_similarity(&self, other: &Vector) -> Result<Real> {
        let dot = self.dot(other)?;
        let denom = self.norm_2() * other.norm_2();
        if denom == 0.0 {
            return Err(LaminaError::invalid_argument(
                "vector",
                "zero norm",
                "non-zero vectors",
            ));
        }
        Ok(dot / denom)
    }

    /// Outer product `self * other^T` (len(self) x len(other)).
    #[must_use]
    pub fn outer_product(&self, other: &Vector) -> Matrix {
        Matrix::outer_product(self, other)
    }

    /// Square matrix with this vector on its diagonal and zeros elsewhere.
    #[must_use]
    pub fn diagonal_matrix(&self) -> Matrix {
        Matrix::from_diagonal(self)
    }

    /// Subtracts every row of `rows` from this vector in turn.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix column count differs from the vector length.
    pub fn subtract_matrix_rows(&self, rows: &Matrix) -> Result<Vector> {
        let (n_rows, n_cols) = rows.shape();
        if n_cols != self.len() {
            return Err(LaminaError::shape_mismatch(
                format!("matrix with {} columns", self.len()),
                format!("{n_rows}x{n_cols}"),
            ));
        }
        let mut out = self.clone();
        for r in 0..n_rows {
            for (o, &b) in out.data.iter_mut().zip(rows.row_slice(r)?) {
                *o -= b;
            }
        }
        Ok(out)
    }

    fn shape_matches(&self, other: &Self) -> bool {
        self.data.len() == other.data.len()
    }

    fn shape_string(&self) -> String {
        format!("[{}]", self.data.len())
    }
}

/// Draws one sample from N(0, 1) using the Box-Muller transform.
pub(crate) fn standard_normal(rng: &mut StdRng) -> Real {
    let u1: Real = rng.gen_range(1e-10..1.0);
    let u2: Real = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI as Real * u2).cos()
}

impl From<Vec<Real>> for Vector {
    fn from(data: Vec<Real>) -> Self {
        Self::from_vec(data)
    }
}

impl FromIterator<Real> for Vector {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Vector {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        &mut self.data[index]
    }
}

impl Mul<Real> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: Real) -> Vector {
        self.scalar_multiply(scalar)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scalar_multiply(-1.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Vector: size {}", self.data.len())?;
        for x in &self.data {
            writeln!(f, "  {x}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "vector_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_vector_contract.rs"]
mod tests_vector_contract;
