//! Polar decomposition `A = U P` of 2x2 and 3x3 matrices.

use crate::error::LinalgError;
use crate::matrix::{Mat2, Mat3};
use crate::scalar::Scalar;
use crate::svd::{svd3, Svd3Kernel, Svd3Params};

/// Result of a polar decomposition `A = U P`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar<M> {
    /// The orthogonal factor.
    pub u: M,
    /// The symmetric positive semi-definite factor.
    pub p: M,
}

impl<M> Polar<M> {
    /// Convert both factors with `f`.
    pub fn map<N>(self, f: impl Fn(M) -> N) -> Polar<N> {
        Polar {
            u: f(self.u),
            p: f(self.p),
        }
    }
}

/// Polar decomposition of a 2x2 matrix in closed form.
///
/// The orthogonal factor is `U = k (A ± cof(A))`, with the sign of the
/// cofactor term following the sign of `det(A)` and `k = 1 / sqrt(|det B|)`
/// normalizing `B = A ± cof(A)`. The stretch is `P = k (AᵀA + |det A| I)`.
///
/// The zero matrix returns `(I, 0)`.
///
/// # Example
///
/// ```
/// use kornia_linalg::{polar_decompose2, Mat2};
///
/// let a = Mat2::from_rows([[2.0, 0.0], [0.0, 3.0]]);
/// let polar = polar_decompose2(&a);
/// assert_eq!(polar.u, Mat2::identity());
/// assert_eq!(polar.p, a);
/// ```
pub fn polar_decompose2<T: Scalar>(a: &Mat2<T>) -> Polar<Mat2<T>> {
    if a.is_zero() {
        log::trace!("polar decomposition of the zero matrix");
        return Polar {
            u: Mat2::identity(),
            p: *a,
        };
    }

    let m = a.to_rows();
    let det_a = a.determinant();
    let b = if det_a < T::zero() {
        Mat2::from_rows([
            [m[0][0] - m[1][1], m[0][1] + m[1][0]],
            [m[1][0] + m[0][1], m[1][1] - m[0][0]],
        ])
    } else {
        Mat2::from_rows([
            [m[0][0] + m[1][1], m[0][1] - m[1][0]],
            [m[1][0] - m[0][1], m[1][1] + m[0][0]],
        ])
    };

    // det(B) != 0 for any non-zero A
    let k = T::one() / b.determinant().abs().sqrt();
    Polar {
        u: b * k,
        p: (a.transpose() * *a + Mat2::identity() * det_a.abs()) * k,
    }
}

/// Polar decomposition of a 3x3 matrix composed from its SVD.
///
/// With `A = U Σ Vᵀ` the factors are `U Vᵀ` and `V Σ Vᵀ`.
///
/// # Arguments
///
/// * `a` - The input matrix.
/// * `kernel` - The 3x3 SVD kernel.
/// * `params` - Parameters forwarded to the kernel.
///
/// # Errors
///
/// Propagates the kernel contract errors of [`svd3`].
pub fn polar_decompose3<T: Scalar, K: Svd3Kernel<T> + ?Sized>(
    a: &Mat3<T>,
    kernel: &K,
    params: &Svd3Params,
) -> Result<Polar<Mat3<T>>, LinalgError> {
    let svd = svd3(a, kernel, params)?;
    let vt = svd.v.transpose();
    Ok(Polar {
        u: svd.u * vt,
        p: svd.v * svd.sigma * vt,
    })
}
