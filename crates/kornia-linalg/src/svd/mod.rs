//! Singular value decomposition `A = U Σ Vᵀ` of 2x2 and 3x3 matrices.
//!
//! The 2x2 case is closed form, built on [`polar_decompose2`]. The 3x3 case
//! delegates the iterative part to an [`Svd3Kernel`] and only assembles its
//! output, so any kernel honoring the contract can be plugged in.

mod jacobi;

pub use jacobi::JacobiSvd3;

use crate::error::LinalgError;
use crate::matrix::{Mat2, Mat3, Vec3};
use crate::polar::{polar_decompose2, Polar};
use crate::scalar::Scalar;

/// Number of scalars produced by a 3x3 SVD kernel: `U` and `V` row-major, then `Σ`.
pub const SVD3_OUTPUT_LEN: usize = 21;

/// Off-diagonal magnitude below which the 2x2 stretch is taken as diagonal.
const SVD2_DIAGONAL_TOLERANCE: f64 = 1e-5;

/// Result of a singular value decomposition `A = U Σ Vᵀ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd<M> {
    /// The left singular vectors, as columns.
    pub u: M,
    /// The diagonal matrix of singular values.
    pub sigma: M,
    /// The right singular vectors, as columns.
    pub v: M,
}

impl<M> Svd<M> {
    /// Convert the three factors with `f`.
    pub fn map<N>(self, f: impl Fn(M) -> N) -> Svd<N> {
        Svd {
            u: f(self.u),
            sigma: f(self.sigma),
            v: f(self.v),
        }
    }
}

/// Parameters for the 3x3 SVD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Svd3Params {
    /// Number of kernel iterations. `None` uses [`Scalar::DEFAULT_SVD_ITERATIONS`].
    pub iterations: Option<u32>,
}

impl Svd3Params {
    /// Parameters with an explicit iteration count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations: Some(iterations),
        }
    }

    /// Iteration count to run in precision `T`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::InvalidIterations`] if the count is zero.
    pub fn iterations_for<T: Scalar>(&self) -> Result<u32, LinalgError> {
        match self.iterations.unwrap_or(T::DEFAULT_SVD_ITERATIONS) {
            0 => Err(LinalgError::InvalidIterations),
            n => Ok(n),
        }
    }
}

/// Iterative 3x3 SVD primitive.
///
/// Given a row-major 3x3 matrix and a positive iteration count, a kernel
/// returns `U` (row-major), `V` (row-major) and the three non-negative
/// singular values, in that order. The singular values need not be sorted.
///
/// Closures with the same signature implement the trait.
pub trait Svd3Kernel<T: Scalar> {
    /// Decompose `a` running `iterations` iterations.
    fn decompose(&self, a: &[T; 9], iterations: u32) -> [T; SVD3_OUTPUT_LEN];
}

impl<T, F> Svd3Kernel<T> for F
where
    T: Scalar,
    F: Fn(&[T; 9], u32) -> [T; SVD3_OUTPUT_LEN],
{
    fn decompose(&self, a: &[T; 9], iterations: u32) -> [T; SVD3_OUTPUT_LEN] {
        self(a, iterations)
    }
}

/// Assemble `U`, `Σ` and `V` from the raw output of a 3x3 SVD kernel.
///
/// # Errors
///
/// [`LinalgError::SvdOutputLength`] if `raw` does not hold exactly
/// [`SVD3_OUTPUT_LEN`] scalars.
pub fn assemble_svd3<T: Scalar>(raw: &[T]) -> Result<Svd<Mat3<T>>, LinalgError> {
    let raw: &[T; SVD3_OUTPUT_LEN] = raw.try_into().map_err(|_| {
        log::debug!(
            "3x3 SVD kernel returned {} scalars instead of {SVD3_OUTPUT_LEN}",
            raw.len()
        );
        LinalgError::SvdOutputLength(raw.len())
    })?;

    let block = |offset: usize| {
        Mat3::from_rows(std::array::from_fn(|i| {
            std::array::from_fn(|j| raw[offset + 3 * i + j])
        }))
    };

    Ok(Svd {
        u: block(0),
        sigma: Mat3::from_diagonal(Vec3::new(raw[18], raw[19], raw[20])),
        v: block(9),
    })
}

/// Singular value decomposition of a 2x2 matrix in closed form.
///
/// The rotation of the polar decomposition `A = R S` is kept and the
/// symmetric stretch `S` is diagonalized with a single Jacobi rotation. The
/// singular values are in descending order and `det(V) = 1`.
///
/// # Example
///
/// ```
/// use kornia_linalg::{svd2, Mat2};
///
/// let a = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
/// let svd = svd2(&a);
/// let reconstruction = svd.u * svd.sigma * svd.v.transpose();
/// assert!((reconstruction - a).frobenius_norm() < 1e-12);
/// ```
pub fn svd2<T: Scalar>(a: &Mat2<T>) -> Svd<Mat2<T>> {
    let Polar { u: r, p: s } = polar_decompose2(a);
    let (s00, s01, s11) = (s[(0, 0)], s[(0, 1)], s[(1, 1)]);
    let two = T::lit(2.0);

    let (c, sn) = if s01.abs() < T::lit(SVD2_DIAGONAL_TOLERANCE) {
        (T::one(), T::zero())
    } else {
        let tau = (s00 - s11) / two;
        let w = (tau * tau + s01 * s01).sqrt();
        let t = if tau > T::zero() {
            s01 / (tau + w)
        } else {
            s01 / (tau - w)
        };
        let c = (t * t + T::one()).sqrt().recip();
        (c, -t * c)
    };

    let mut s1 = c * c * s00 - two * c * sn * s01 + sn * sn * s11;
    let mut s2 = sn * sn * s00 + two * c * sn * s01 + c * c * s11;
    let v = if s1 < s2 {
        std::mem::swap(&mut s1, &mut s2);
        Mat2::from_rows([[-sn, c], [-c, -sn]])
    } else {
        Mat2::from_rows([[c, sn], [-sn, c]])
    };

    Svd {
        u: r * v,
        sigma: Mat2::from_rows([[s1, T::zero()], [T::zero(), s2]]),
        v,
    }
}

/// Singular value decomposition of a 3x3 matrix.
///
/// # Arguments
///
/// * `a` - The input matrix.
/// * `kernel` - The iterative SVD primitive, usually [`JacobiSvd3`].
/// * `params` - The iteration count to pass to the kernel.
///
/// # Errors
///
/// [`LinalgError::InvalidIterations`] if the iteration count is zero.
pub fn svd3<T: Scalar, K: Svd3Kernel<T> + ?Sized>(
    a: &Mat3<T>,
    kernel: &K,
    params: &Svd3Params,
) -> Result<Svd<Mat3<T>>, LinalgError> {
    let iterations = params.iterations_for::<T>()?;
    let raw = kernel.decompose(&a.to_row_major(), iterations);
    assemble_svd3(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    fn check_svd2(a: &Mat2<f64>) {
        let Svd { u, sigma, v } = svd2(a);
        assert_relative_eq!(u * sigma * v.transpose(), *a, epsilon = 1e-12);
        assert_relative_eq!(u.transpose() * u, Mat2::identity(), epsilon = 1e-12);
        assert_relative_eq!(v.transpose() * v, Mat2::identity(), epsilon = 1e-12);
        assert_relative_eq!(v.determinant(), 1.0, epsilon = 1e-12);
        assert_eq!(sigma[(0, 1)], 0.0);
        assert_eq!(sigma[(1, 0)], 0.0);
        assert!(sigma[(0, 0)] >= sigma[(1, 1)]);
        assert!(sigma[(1, 1)] >= -1e-12);
    }

    #[test]
    fn test_svd2() {
        check_svd2(&Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]));
        check_svd2(&Mat2::from_rows([[1.0, 0.0], [0.0, 3.0]]));
        check_svd2(&Mat2::from_rows([[0.0, -2.0], [5.0, 0.1]]));
        check_svd2(&Mat2::from_rows([[2.0, 2.0], [1.0, 1.0]]));
        check_svd2(&Mat2::from_rows([[-1.0, 0.5], [0.25, 3.0]]));
    }

    #[test]
    fn test_svd2_known_values() {
        let a = Mat2::from_rows([[3.0, 0.0], [4.0, 5.0]]);
        let svd = svd2(&a);
        assert_relative_eq!(svd.sigma[(0, 0)], 45f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(svd.sigma[(1, 1)], 5f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_svd2_zero() {
        let svd = svd2(&Mat2::<f32>::zeros());
        assert_eq!(svd.u, Mat2::identity());
        assert_eq!(svd.v, Mat2::identity());
        assert_eq!(svd.sigma, Mat2::zeros());
    }

    #[test]
    fn test_assemble_svd3() -> Result<(), LinalgError> {
        let mut raw: Vec<f64> = (0..SVD3_OUTPUT_LEN).map(|i| i as f64).collect();
        let svd = assemble_svd3(&raw)?;
        assert_eq!(svd.u.row(1), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(svd.v.row(0), Vec3::new(9.0, 10.0, 11.0));
        assert_eq!(svd.sigma.diagonal(), Vec3::new(18.0, 19.0, 20.0));
        assert_eq!(svd.sigma[(0, 1)], 0.0);

        raw.pop();
        assert_eq!(assemble_svd3(&raw), Err(LinalgError::SvdOutputLength(20)));
        raw.extend([0.0, 0.0]);
        assert_eq!(assemble_svd3(&raw), Err(LinalgError::SvdOutputLength(22)));
        Ok(())
    }

    #[test]
    fn test_svd3_iterations() -> Result<(), LinalgError> {
        let seen = Cell::new(0);
        let kernel = |a: &[f32; 9], iterations: u32| {
            seen.set(iterations);
            let mut out = [0.0; SVD3_OUTPUT_LEN];
            out[..9].copy_from_slice(a);
            out[9..18].copy_from_slice(&Mat3::<f32>::identity().to_row_major());
            out[18..].copy_from_slice(&[1.0; 3]);
            out
        };

        let a = Mat3::<f32>::identity();
        svd3(&a, &kernel, &Svd3Params::default())?;
        assert_eq!(seen.get(), 5);
        svd3(&a, &kernel, &Svd3Params::with_iterations(12))?;
        assert_eq!(seen.get(), 12);

        assert_eq!(
            svd3(&a, &kernel, &Svd3Params::with_iterations(0)),
            Err(LinalgError::InvalidIterations)
        );
        assert_eq!(Svd3Params::default().iterations_for::<f64>(), Ok(8));
        Ok(())
    }

    #[test]
    fn test_svd3_jacobi() -> Result<(), LinalgError> {
        let a = Mat3::from_rows([[2.0, -1.0, 0.0], [1.0, 3.0, 1.0], [0.5, 0.0, -2.0]]);
        let Svd { u, sigma, v } = svd3(&a, &JacobiSvd3, &Svd3Params::default())?;
        assert_relative_eq!(u * sigma * v.transpose(), a, epsilon = 1e-9);
        Ok(())
    }
}
