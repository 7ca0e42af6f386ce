//! Fixed-size matrix and vector value types backed by `glam`.
//!
//! [`Mat2`], [`Mat3`], [`Vec2`] and [`Vec3`] are `#[repr(transparent)]` newtypes
//! over the `glam` type that [`Scalar`] names for their precision: `glam::Mat3`
//! for `f32`, `glam::DMat3` for `f64` and so on. Arithmetic is delegated to
//! `glam`. Indexing is `m[(row, col)]`, and row-major input/output is provided
//! on top of glam's column-major storage.

use crate::scalar::Scalar;
use std::fmt::Debug;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A `glam` vector type that can back a [`Vec2`] or [`Vec3`].
pub trait GlamVector<T, const N: usize>:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<T, Output = Self>
    + Index<usize, Output = T>
    + IndexMut<usize>
{
    /// All zeros.
    const ZERO: Self;

    /// Create a vector from an array.
    fn from_array(array: [T; N]) -> Self;

    /// The elements as an array.
    fn to_array(&self) -> [T; N];

    /// The elements as an array reference.
    fn as_array(&self) -> &[T; N];

    /// Dot product.
    fn dot(self, rhs: Self) -> T;

    /// Squared euclidean length.
    fn length_squared(self) -> T;

    /// Whether every element is finite.
    fn is_finite(self) -> bool;
}

/// A 3-element `glam` vector type.
pub trait GlamVector3<T>: GlamVector<T, 3> {
    /// Cross product.
    fn cross(self, rhs: Self) -> Self;
}

/// A `glam` matrix type that can back a [`Mat2`] or [`Mat3`].
pub trait GlamMatrix<T, const N: usize>:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<Output = Self>
    + Mul<T, Output = Self>
{
    /// The column vector type.
    type Column: GlamVector<T, N>;

    /// All zeros.
    const ZERO: Self;

    /// The identity matrix.
    const IDENTITY: Self;

    /// Create a matrix from an array of columns.
    fn from_cols_array_2d(m: &[[T; N]; N]) -> Self;

    /// The columns as arrays.
    fn to_cols_array_2d(&self) -> [[T; N]; N];

    /// Create a diagonal matrix.
    fn from_diagonal(diagonal: Self::Column) -> Self;

    /// The `index`-th column.
    fn col(&self, index: usize) -> Self::Column;

    /// A reference to the `index`-th column.
    fn col_ref(&self, index: usize) -> &Self::Column;

    /// A mutable reference to the `index`-th column.
    fn col_mut(&mut self, index: usize) -> &mut Self::Column;

    /// Matrix-vector product.
    fn mul_vec(&self, rhs: Self::Column) -> Self::Column;

    /// The transpose.
    fn transpose(&self) -> Self;

    /// The determinant.
    fn determinant(&self) -> T;

    /// Whether every element is finite.
    fn is_finite(&self) -> bool;
}

macro_rules! impl_glam_vector {
    ($glam_vec:ty, $scalar:ty, $n:literal) => {
        impl GlamVector<$scalar, $n> for $glam_vec {
            const ZERO: Self = <$glam_vec>::ZERO;

            #[inline]
            fn from_array(array: [$scalar; $n]) -> Self {
                <$glam_vec>::from_array(array)
            }

            #[inline]
            fn to_array(&self) -> [$scalar; $n] {
                <$glam_vec>::to_array(self)
            }

            #[inline]
            fn as_array(&self) -> &[$scalar; $n] {
                AsRef::<[$scalar; $n]>::as_ref(self)
            }

            #[inline]
            fn dot(self, rhs: Self) -> $scalar {
                <$glam_vec>::dot(self, rhs)
            }

            #[inline]
            fn length_squared(self) -> $scalar {
                <$glam_vec>::length_squared(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$glam_vec>::is_finite(self)
            }
        }
    };
}

impl_glam_vector!(glam::Vec2, f32, 2);
impl_glam_vector!(glam::DVec2, f64, 2);
impl_glam_vector!(glam::Vec3, f32, 3);
impl_glam_vector!(glam::DVec3, f64, 3);

impl GlamVector3<f32> for glam::Vec3 {
    #[inline]
    fn cross(self, rhs: Self) -> Self {
        glam::Vec3::cross(self, rhs)
    }
}

impl GlamVector3<f64> for glam::DVec3 {
    #[inline]
    fn cross(self, rhs: Self) -> Self {
        glam::DVec3::cross(self, rhs)
    }
}

macro_rules! impl_glam_matrix {
    (
        $glam_mat:ty,
        $glam_vec:ty,
        $scalar:ty,
        $n:literal,
        $mul_vec:ident,
        [$($index:literal => $col:ident),+]
    ) => {
        impl GlamMatrix<$scalar, $n> for $glam_mat {
            type Column = $glam_vec;

            const ZERO: Self = <$glam_mat>::ZERO;
            const IDENTITY: Self = <$glam_mat>::IDENTITY;

            #[inline]
            fn from_cols_array_2d(m: &[[$scalar; $n]; $n]) -> Self {
                <$glam_mat>::from_cols_array_2d(m)
            }

            #[inline]
            fn to_cols_array_2d(&self) -> [[$scalar; $n]; $n] {
                <$glam_mat>::to_cols_array_2d(self)
            }

            #[inline]
            fn from_diagonal(diagonal: $glam_vec) -> Self {
                <$glam_mat>::from_diagonal(diagonal)
            }

            #[inline]
            fn col(&self, index: usize) -> $glam_vec {
                <$glam_mat>::col(self, index)
            }

            #[inline]
            fn col_ref(&self, index: usize) -> &$glam_vec {
                match index {
                    $($index => &self.$col,)+
                    _ => panic!("index out of bounds"),
                }
            }

            #[inline]
            fn col_mut(&mut self, index: usize) -> &mut $glam_vec {
                <$glam_mat>::col_mut(self, index)
            }

            #[inline]
            fn mul_vec(&self, rhs: $glam_vec) -> $glam_vec {
                <$glam_mat>::$mul_vec(self, rhs)
            }

            #[inline]
            fn transpose(&self) -> Self {
                <$glam_mat>::transpose(self)
            }

            #[inline]
            fn determinant(&self) -> $scalar {
                <$glam_mat>::determinant(self)
            }

            #[inline]
            fn is_finite(&self) -> bool {
                <$glam_mat>::is_finite(self)
            }
        }
    };
}

impl_glam_matrix!(glam::Mat2, glam::Vec2, f32, 2, mul_vec2, [0 => x_axis, 1 => y_axis]);
impl_glam_matrix!(glam::DMat2, glam::DVec2, f64, 2, mul_vec2, [0 => x_axis, 1 => y_axis]);
impl_glam_matrix!(
    glam::Mat3,
    glam::Vec3,
    f32,
    3,
    mul_vec3,
    [0 => x_axis, 1 => y_axis, 2 => z_axis]
);
impl_glam_matrix!(
    glam::DMat3,
    glam::DVec3,
    f64,
    3,
    mul_vec3,
    [0 => x_axis, 1 => y_axis, 2 => z_axis]
);

macro_rules! define_vector_type {
    (
        $(#[$meta:meta])*
        $name:ident,
        $backing:ident,
        $n:literal,
        [$($elem:ident),+]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[repr(transparent)]
        pub struct $name<T: Scalar>(pub T::$backing);

        impl<T: Scalar> $name<T> {
            /// Create a new vector from its elements.
            #[inline]
            pub fn new($($elem: T),+) -> Self {
                Self::from_array([$($elem),+])
            }

            /// Create a new vector from an array.
            #[inline]
            pub fn from_array(array: [T; $n]) -> Self {
                Self(<T::$backing as GlamVector<T, $n>>::from_array(array))
            }

            /// The zero vector.
            #[inline]
            pub fn zeros() -> Self {
                Self(<T::$backing as GlamVector<T, $n>>::ZERO)
            }

            /// The elements as an array.
            #[inline]
            pub fn to_array(&self) -> [T; $n] {
                self.0.to_array()
            }

            /// The elements as a slice.
            #[inline]
            pub fn as_slice(&self) -> &[T] {
                self.0.as_array()
            }

            /// Dot product.
            #[inline]
            pub fn dot(&self, other: &Self) -> T {
                self.0.dot(other.0)
            }

            /// Squared euclidean norm.
            #[inline]
            pub fn norm_squared(&self) -> T {
                self.0.length_squared()
            }

            /// Euclidean norm.
            #[inline]
            pub fn norm(&self) -> T {
                self.norm_squared().sqrt()
            }

            /// Whether every element is finite.
            #[inline]
            pub fn is_finite(&self) -> bool {
                self.0.is_finite()
            }
        }

        impl<T: Scalar> Index<usize> for $name<T> {
            type Output = T;

            #[inline]
            fn index(&self, i: usize) -> &T {
                &self.0[i]
            }
        }

        impl<T: Scalar> IndexMut<usize> for $name<T> {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut T {
                &mut self.0[i]
            }
        }

        impl<T: Scalar> Add for $name<T> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl<T: Scalar> Sub for $name<T> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl<T: Scalar> Neg for $name<T> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        // Scalar multiplication
        impl<T: Scalar> Mul<T> for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: T) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl<T: Scalar> approx::AbsDiffEq for $name<T> {
            type Epsilon = T;

            #[inline]
            fn default_epsilon() -> T {
                <T as approx::AbsDiffEq>::default_epsilon()
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                self.as_slice()
                    .iter()
                    .zip(other.as_slice())
                    .all(|(a, b)| <T as approx::AbsDiffEq>::abs_diff_eq(a, b, epsilon))
            }
        }

        impl<T: Scalar> approx::RelativeEq for $name<T> {
            #[inline]
            fn default_max_relative() -> T {
                <T as approx::RelativeEq>::default_max_relative()
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                self.as_slice().iter().zip(other.as_slice()).all(|(a, b)| {
                    <T as approx::RelativeEq>::relative_eq(a, b, epsilon, max_relative)
                })
            }
        }
    };
}

define_vector_type!(
    /// A 2-element vector.
    Vec2,
    GlamVec2,
    2,
    [x, y]
);

define_vector_type!(
    /// A 3-element vector.
    Vec3,
    GlamVec3,
    3,
    [x, y, z]
);

impl<T: Scalar> Vec3<T> {
    /// Cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross(other.0))
    }
}

macro_rules! define_matrix_type {
    (
        $(#[$meta:meta])*
        $name:ident,
        $backing:ident,
        $vec_type:ident,
        $n:literal,
        $len:literal,
        [$($col:ident),+]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[repr(transparent)]
        pub struct $name<T: Scalar>(pub T::$backing);

        impl<T: Scalar> $name<T> {
            /// Create a new matrix from column vectors.
            #[inline]
            pub fn from_cols($($col: $vec_type<T>),+) -> Self {
                Self(<T::$backing as GlamMatrix<T, $n>>::from_cols_array_2d(&[
                    $($col.to_array()),+
                ]))
            }

            /// Create a new matrix from its rows.
            #[inline]
            pub fn from_rows(rows: [[T; $n]; $n]) -> Self {
                Self(<T::$backing as GlamMatrix<T, $n>>::from_cols_array_2d(&rows).transpose())
            }

            /// Create a new matrix from row-major elements.
            #[inline]
            pub fn from_row_major(data: &[T; $len]) -> Self {
                Self::from_rows(std::array::from_fn(|i| {
                    std::array::from_fn(|j| data[i * $n + j])
                }))
            }

            /// The zero matrix.
            #[inline]
            pub fn zeros() -> Self {
                Self(<T::$backing as GlamMatrix<T, $n>>::ZERO)
            }

            /// The identity matrix.
            #[inline]
            pub fn identity() -> Self {
                Self(<T::$backing as GlamMatrix<T, $n>>::IDENTITY)
            }

            /// Create a diagonal matrix from a vector.
            #[inline]
            pub fn from_diagonal(diagonal: $vec_type<T>) -> Self {
                Self(<T::$backing as GlamMatrix<T, $n>>::from_diagonal(diagonal.0))
            }

            /// Transpose the matrix.
            #[inline]
            pub fn transpose(&self) -> Self {
                Self(self.0.transpose())
            }

            /// Get the determinant of the matrix.
            #[inline]
            pub fn determinant(&self) -> T {
                self.0.determinant()
            }

            /// Check if all elements are finite.
            #[inline]
            pub fn is_finite(&self) -> bool {
                self.0.is_finite()
            }

            /// The `j`-th column.
            #[inline]
            pub fn col(&self, j: usize) -> $vec_type<T> {
                $vec_type(self.0.col(j))
            }

            /// Overwrite the `j`-th column.
            #[inline]
            pub fn set_col(&mut self, j: usize, col: $vec_type<T>) {
                *self.0.col_mut(j) = col.0;
            }

            /// The `i`-th row.
            #[inline]
            pub fn row(&self, i: usize) -> $vec_type<T> {
                self.transpose().col(i)
            }

            /// The rows as arrays.
            #[inline]
            pub fn to_rows(&self) -> [[T; $n]; $n] {
                self.0.transpose().to_cols_array_2d()
            }

            /// The elements in row-major order.
            #[inline]
            pub fn to_row_major(&self) -> [T; $len] {
                let rows = self.to_rows();
                std::array::from_fn(|k| rows[k / $n][k % $n])
            }

            /// The diagonal elements.
            #[inline]
            pub fn diagonal(&self) -> $vec_type<T> {
                $vec_type::from_array(std::array::from_fn(|i| self[(i, i)]))
            }

            /// Sum of the diagonal elements.
            #[inline]
            pub fn trace(&self) -> T {
                (0..$n).fold(T::zero(), |acc, i| acc + self[(i, i)])
            }

            /// Whether every element is exactly zero.
            #[inline]
            pub fn is_zero(&self) -> bool {
                self.to_row_major().iter().all(|x| x.is_zero())
            }

            /// Whether the matrix equals its transpose exactly.
            #[inline]
            pub fn is_symmetric(&self) -> bool {
                (0..$n).all(|i| (i + 1..$n).all(|j| self[(i, j)] == self[(j, i)]))
            }

            /// The largest absolute element.
            #[inline]
            pub fn max_abs(&self) -> T {
                self.to_row_major()
                    .iter()
                    .fold(T::zero(), |acc, x| acc.max(x.abs()))
            }

            /// The Frobenius norm.
            #[inline]
            pub fn frobenius_norm(&self) -> T {
                self.to_row_major()
                    .iter()
                    .fold(T::zero(), |acc, &x| acc + x * x)
                    .sqrt()
            }
        }

        impl<T: Scalar> Index<(usize, usize)> for $name<T> {
            type Output = T;

            #[inline]
            fn index(&self, (i, j): (usize, usize)) -> &T {
                &self.0.col_ref(j)[i]
            }
        }

        impl<T: Scalar> IndexMut<(usize, usize)> for $name<T> {
            #[inline]
            fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
                &mut self.0.col_mut(j)[i]
            }
        }

        // Matrix-matrix multiplication.
        impl<T: Scalar> Mul<$name<T>> for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self(self.0 * rhs.0)
            }
        }

        // Matrix-vector multiplication.
        impl<T: Scalar> Mul<$vec_type<T>> for $name<T> {
            type Output = $vec_type<T>;

            #[inline]
            fn mul(self, rhs: $vec_type<T>) -> $vec_type<T> {
                $vec_type(self.0.mul_vec(rhs.0))
            }
        }

        // Scalar multiplication
        impl<T: Scalar> Mul<T> for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: T) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl<T: Scalar> Add for $name<T> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl<T: Scalar> Sub for $name<T> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl<T: Scalar> Neg for $name<T> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl<T: Scalar> approx::AbsDiffEq for $name<T> {
            type Epsilon = T;

            #[inline]
            fn default_epsilon() -> T {
                <T as approx::AbsDiffEq>::default_epsilon()
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                let a = self.to_row_major();
                let b = other.to_row_major();
                a.iter()
                    .zip(b.iter())
                    .all(|(ai, bi)| <T as approx::AbsDiffEq>::abs_diff_eq(ai, bi, epsilon))
            }
        }

        impl<T: Scalar> approx::RelativeEq for $name<T> {
            #[inline]
            fn default_max_relative() -> T {
                <T as approx::RelativeEq>::default_max_relative()
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                let a = self.to_row_major();
                let b = other.to_row_major();
                a.iter().zip(b.iter()).all(|(ai, bi)| {
                    <T as approx::RelativeEq>::relative_eq(ai, bi, epsilon, max_relative)
                })
            }
        }
    };
}

define_matrix_type!(
    /// A 2x2 matrix.
    Mat2,
    GlamMat2,
    Vec2,
    2,
    4,
    [x_axis, y_axis]
);

define_matrix_type!(
    /// A 3x3 matrix.
    Mat3,
    GlamMat3,
    Vec3,
    3,
    9,
    [x_axis, y_axis, z_axis]
);

// Conversions to and from the underlying glam types.
macro_rules! impl_glam_conversions {
    ($name:ident, $glam_type:ty, $scalar:ty) => {
        impl From<$glam_type> for $name<$scalar> {
            #[inline]
            fn from(m: $glam_type) -> Self {
                Self(m)
            }
        }

        impl From<$name<$scalar>> for $glam_type {
            #[inline]
            fn from(m: $name<$scalar>) -> Self {
                m.0
            }
        }
    };
}

impl_glam_conversions!(Mat2, glam::Mat2, f32);
impl_glam_conversions!(Mat2, glam::DMat2, f64);
impl_glam_conversions!(Mat3, glam::Mat3, f32);
impl_glam_conversions!(Mat3, glam::DMat3, f64);
impl_glam_conversions!(Vec2, glam::Vec2, f32);
impl_glam_conversions!(Vec2, glam::DVec2, f64);
impl_glam_conversions!(Vec3, glam::Vec3, f32);
impl_glam_conversions!(Vec3, glam::DVec3, f64);
