//! Elementwise arithmetic shared by `Vector`, `Matrix` and `Tensor3`.
//!
//! Every operation comes in three flavours:
//!
//! - `op(&self, ..) -> Self`: allocates and returns a new container
//! - `op_in_place(&mut self, ..)`: overwrites the receiver
//! - `op_into(&self, .., out: &mut Self)`: writes into a caller-owned, pre-sized output
//!
//! Binary operations and every `_into` variant validate shapes first and return
//! `ShapeMismatch` without touching any operand when they disagree.
//!
//! The generated methods expect the host type to have a `data: Vec<Real>` field and
//! `shape_matches` / `shape_string` helpers.

/// Expands to the full elementwise method family inside an inherent `impl` block.
macro_rules! elementwise_methods {
    () => {
        /// Applies `f` to every element, returning a new container.
        #[must_use]
        pub fn map<F: Fn($crate::Real) -> $crate::Real>(&self, f: F) -> Self {
            let mut out = self.clone();
            out.map_in_place(f);
            out
        }

        /// Applies `f` to every element in place.
        pub fn map_in_place<F: Fn($crate::Real) -> $crate::Real>(&mut self, f: F) {
            for x in &mut self.data {
                *x = f(*x);
            }
        }

        /// Applies `f` to every element, writing the results into `out`.
        ///
        /// # Errors
        ///
        /// Returns `ShapeMismatch` if `out` does not have the shape of `self`.
        pub fn map_into<F: Fn($crate::Real) -> $crate::Real>(
            &self,
            out: &mut Self,
            f: F,
        ) -> $crate::error::Result<()> {
            self.check_shape(out)?;
            for (o, &x) in out.data.iter_mut().zip(self.data.iter()) {
                *o = f(x);
            }
            Ok(())
        }

        /// Combines two equally shaped containers elementwise, returning a new container.
        ///
        /// # Errors
        ///
        /// Returns `ShapeMismatch` if the shapes differ.
        pub fn zip_with<F: Fn($crate::Real, $crate::Real) -> $crate::Real>(
            &self,
            other: &Self,
            f: F,
        ) -> $crate::error::Result<Self> {
            self.check_shape(other)?;
            let mut out = self.clone();
            for (o, &y) in out.data.iter_mut().zip(other.data.iter()) {
                *o = f(*o, y);
            }
            Ok(out)
        }

        /// Combines `other` into `self` elementwise.
        ///
        /// # Errors
        ///
        /// Returns `ShapeMismatch` if the shapes differ; `self` is left untouched.
        pub fn zip_with_in_place<F: Fn($crate::Real, $crate::Real) -> $crate::Real>(
            &mut self,
            other: &Self,
            f: F,
        ) -> $crate::error::Result<()> {
            self.check_shape(other)?;
            for (x, &y) in self.data.iter_mut().zip(other.data.iter()) {
                *x = f(*x, y);
            }
            Ok(())
        }

        /// Combines two containers elementwise, writing the results into `out`.
        ///
        /// # Errors
        ///
        /// Returns `ShapeMismatch` if `other` or `out` differ in shape from `self`.
        pub fn zip_with_into<F: Fn($crate::Real, $crate::Real) -> $crate::Real>(
            &self,
            other: &Self,
            out: &mut Self,
            f: F,
        ) -> $crate::error::Result<()> {
            self.check_shape(other)?;
            self.check_shape(out)?;
            let pairs = self.data.iter().zip(other.data.iter());
            for (o, (&x, &y)) in out.data.iter_mut().zip(pairs) {
                *o = f(x, y);
            }
            Ok(())
        }

        /// Returns true when both containers have the same shape and every pair of
        /// elements differs by at most `tolerance`.
        #[must_use]
        pub fn is_equal_approx(&self, other: &Self, tolerance: $crate::Real) -> bool {
            self.shape_matches(other)
                && self
                    .data
                    .iter()
                    .zip(other.data.iter())
                    .all(|(a, b)| (a - b).abs() <= tolerance)
        }

        /// [`is_equal_approx`](Self::is_equal_approx) with the default tolerance
        /// [`CMP_EPSILON`](crate::CMP_EPSILON).
        #[must_use]
        pub fn is_equal_approx_default(&self, other: &Self) -> bool {
            self.is_equal_approx(other, $crate::CMP_EPSILON)
        }

        fn check_shape(&self, other: &Self) -> $crate::error::Result<()> {
            if self.shape_matches(other) {
                Ok(())
            } else {
                Err($crate::error::LaminaError::shape_mismatch(
                    self.shape_string(),
                    other.shape_string(),
                ))
            }
        }

        $crate::primitives::elementwise::binary_ops! {
            add, add_in_place, add_into, |a: $crate::Real, b: $crate::Real| a + b,
                "Elementwise sum";
            sub, sub_in_place, sub_into, |a: $crate::Real, b: $crate::Real| a - b,
                "Elementwise difference";
            hadamard_product, hadamard_product_in_place, hadamard_product_into,
                |a: $crate::Real, b: $crate::Real| a * b,
                "Elementwise (Hadamard) product";
            division_element_wise, division_element_wise_in_place, division_element_wise_into,
                |a: $crate::Real, b: $crate::Real| a / b,
                "Elementwise quotient";
            max, max_in_place, max_into, |a: $crate::Real, b: $crate::Real| a.max(b),
                "Elementwise maximum";
            min, min_in_place, min_into, |a: $crate::Real, b: $crate::Real| a.min(b),
                "Elementwise minimum";
        }

        $crate::primitives::elementwise::scalar_ops! {
            scalar_multiply, scalar_multiply_in_place, scalar_multiply_into,
                |x: $crate::Real, s: $crate::Real| x * s,
                "Multiplies every element by a scalar";
            scalar_add, scalar_add_in_place, scalar_add_into,
                |x: $crate::Real, s: $crate::Real| x + s,
                "Adds a scalar to every element";
            exponentiate, exponentiate_in_place, exponentiate_into,
                |x: $crate::Real, p: $crate::Real| x.powf(p),
                "Raises every element to the power `p`";
            max_scalar, max_scalar_in_place, max_scalar_into,
                |x: $crate::Real, s: $crate::Real| x.max(s),
                "Elementwise maximum against a scalar";
            min_scalar, min_scalar_in_place, min_scalar_into,
                |x: $crate::Real, s: $crate::Real| x.min(s),
                "Elementwise minimum against a scalar";
        }

        $crate::primitives::elementwise::unary_ops! {
            log, log_in_place, log_into, |x: $crate::Real| x.ln(),
                "Natural logarithm of every element";
            log10, log10_in_place, log10_into, |x: $crate::Real| x.log10(),
                "Base-10 logarithm of every element";
            exp, exp_in_place, exp_into, |x: $crate::Real| x.exp(),
                "Exponential of every element";
            erf, erf_in_place, erf_into, $crate::erf,
                "Error function of every element";
            sqrt, sqrt_in_place, sqrt_into, |x: $crate::Real| x.sqrt(),
                "Square root of every element";
            cbrt, cbrt_in_place, cbrt_into, |x: $crate::Real| x.cbrt(),
                "Cube root of every element";
            abs, abs_in_place, abs_into, |x: $crate::Real| x.abs(),
                "Absolute value of every element";
            round, round_in_place, round_into, |x: $crate::Real| x.round(),
                "Rounds every element to the nearest integer, halves away from zero";
            sin, sin_in_place, sin_into, |x: $crate::Real| x.sin(),
                "Sine of every element";
            cos, cos_in_place, cos_into, |x: $crate::Real| x.cos(),
                "Cosine of every element";
        }

        /// Clamps every element into `[lo, hi]`.
        ///
        /// # Errors
        ///
        /// Returns `InvalidArgument` if a bound is NaN or `lo > hi`.
        pub fn clamp(&self, lo: $crate::Real, hi: $crate::Real) -> $crate::error::Result<Self> {
            let mut out = self.clone();
            out.clamp_in_place(lo, hi)?;
            Ok(out)
        }

        /// Clamps every element into `[lo, hi]` in place; the receiver is untouched on error.
        ///
        /// # Errors
        ///
        /// Returns `InvalidArgument` if a bound is NaN or `lo > hi`.
        pub fn clamp_in_place(
            &mut self,
            lo: $crate::Real,
            hi: $crate::Real,
        ) -> $crate::error::Result<()> {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err($crate::error::LaminaError::invalid_argument(
                    "bounds",
                    format!("[{lo}, {hi}]"),
                    "non-NaN bounds with lo <= hi",
                ));
            }
            self.map_in_place(|x| x.clamp(lo, hi));
            Ok(())
        }
    };
}

macro_rules! binary_ops {
    ($($name:ident, $in_place:ident, $into:ident, $f:expr, $doc:literal;)*) => {
        $(
            #[doc = concat!($doc, ", returning a new container.")]
            ///
            /// # Errors
            ///
            /// Returns `ShapeMismatch` if the shapes differ.
            pub fn $name(&self, other: &Self) -> $crate::error::Result<Self> {
                self.zip_with(other, $f)
            }

            #[doc = concat!($doc, ", written into `self`.")]
            ///
            /// # Errors
            ///
            /// Returns `ShapeMismatch` if the shapes differ; `self` is left untouched.
            pub fn $in_place(&mut self, other: &Self) -> $crate::error::Result<()> {
                self.zip_with_in_place(other, $f)
            }

            #[doc = concat!($doc, ", written into `out`.")]
            ///
            /// # Errors
            ///
            /// Returns `ShapeMismatch` if `other` or `out` differ in shape from `self`.
            pub fn $into(&self, other: &Self, out: &mut Self) -> $crate::error::Result<()> {
                self.zip_with_into(other, out, $f)
            }
        )*
    };
}

macro_rules! scalar_ops {
    ($($name:ident, $in_place:ident, $into:ident, $f:expr, $doc:literal;)*) => {
        $(
            #[doc = concat!($doc, ", returning a new container.")]
            #[must_use]
            pub fn $name(&self, scalar: $crate::Real) -> Self {
                let f = $f;
                self.map(|x| f(x, scalar))
            }

            #[doc = concat!($doc, ", in place.")]
            pub fn $in_place(&mut self, scalar: $crate::Real) {
                let f = $f;
                self.map_in_place(|x| f(x, scalar));
            }

            #[doc = concat!($doc, ", written into `out`.")]
            ///
            /// # Errors
            ///
            /// Returns `ShapeMismatch` if `out` does not have the shape of `self`.
            pub fn $into(&self, scalar: $crate::Real, out: &mut Self) -> $crate::error::Result<()> {
                let f = $f;
                self.map_into(out, |x| f(x, scalar))
            }
        )*
    };
}

macro_rules! unary_ops {
    ($($name:ident, $in_place:ident, $into:ident, $f:expr, $doc:literal;)*) => {
        $(
            #[doc = concat!($doc, ", returning a new container.")]
            #[must_use]
            pub fn $name(&self) -> Self {
                self.map($f)
            }

            #[doc = concat!($doc, ", in place.")]
            pub fn $in_place(&mut self) {
                self.map_in_place($f);
            }

            #[doc = concat!($doc, ", written into `out`.")]
            ///
            /// # Errors
            ///
            /// Returns `ShapeMismatch` if `out` does not have the shape of `self`.
            pub fn $into(&self, out: &mut Self) -> $crate::error::Result<()> {
                self.map_into(out, $f)
            }
        )*
    };
}

pub(crate) use binary_ops;
pub(crate) use elementwise_methods;
pub(crate) use scalar_ops;
pub(crate) use unary_ops;
