use crate::matrix::{GlamMatrix, GlamVector, GlamVector3};
use num_traits::{Float, FloatConst};
use rand::Rng;

/// Floating point precision used when the caller does not pick one.
pub type DefaultFloat = f32;

/// Floating point type the kernels can run in.
///
/// Implemented for `f32` and `f64`. The precision of a call is selected by the
/// type parameter and every intermediate value of that call uses it. Each
/// precision names the `glam` types that store its matrices and vectors.
pub trait Scalar:
    Float
    + FloatConst
    + Default
    + std::fmt::Debug
    + approx::RelativeEq<Epsilon = Self>
    + Send
    + Sync
    + 'static
{
    /// Backing storage of a 2-element vector.
    type GlamVec2: GlamVector<Self, 2>;
    /// Backing storage of a 3-element vector.
    type GlamVec3: GlamVector3<Self>;
    /// Backing storage of a 2x2 matrix.
    type GlamMat2: GlamMatrix<Self, 2, Column = Self::GlamVec2>;
    /// Backing storage of a 3x3 matrix.
    type GlamMat3: GlamMatrix<Self, 3, Column = Self::GlamVec3>;

    /// Number of Jacobi sweeps the 3x3 SVD kernel runs when none is requested.
    const DEFAULT_SVD_ITERATIONS: u32;

    /// Converts a literal constant into this precision.
    fn lit(value: f64) -> Self;

    /// Draws a uniform sample in `[0, 1)`.
    fn sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl Scalar for f32 {
    type GlamVec2 = glam::Vec2;
    type GlamVec3 = glam::Vec3;
    type GlamMat2 = glam::Mat2;
    type GlamMat3 = glam::Mat3;

    const DEFAULT_SVD_ITERATIONS: u32 = 5;

    #[inline(always)]
    fn lit(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random::<f32>()
    }
}

impl Scalar for f64 {
    type GlamVec2 = glam::DVec2;
    type GlamVec3 = glam::DVec3;
    type GlamMat2 = glam::DMat2;
    type GlamMat3 = glam::DMat3;

    const DEFAULT_SVD_ITERATIONS: u32 = 8;

    #[inline(always)]
    fn lit(value: f64) -> Self {
        value
    }

    #[inline]
    fn sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random::<f64>()
    }
}
