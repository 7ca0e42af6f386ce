//! Size-dispatching entry points over [`SmallMatrix`] and [`SmallVector`].

use crate::eig::{eig2, GeneralEigen};
use crate::error::LinalgError;
use crate::polar::{polar_decompose2, polar_decompose3, Polar};
use crate::scalar::Scalar;
use crate::small::{SmallMatrix, SmallVector};
use crate::solve::{solve2, solve3};
use crate::svd::{svd2, svd3, JacobiSvd3, Svd, Svd3Kernel, Svd3Params};
use crate::sym_eig::{sym_eig2, sym_eig3, SymEigen};

/// Polar decomposition `A = U P` using the native 3x3 SVD kernel.
///
/// # Errors
///
/// See [`polar_decompose_with`].
///
/// # Example
///
/// ```
/// use kornia_linalg::{polar_decompose, SmallMatrix};
///
/// let a = SmallMatrix::from_row_slice(2, 2, &[0.0f32, 0.0, 0.0, 0.0]).unwrap();
/// let polar = polar_decompose(&a).unwrap();
/// assert_eq!(polar.u.get(0, 0), 1.0);
/// ```
pub fn polar_decompose<T: Scalar>(
    a: &SmallMatrix<T>,
) -> Result<Polar<SmallMatrix<T>>, LinalgError> {
    polar_decompose_with(a, &JacobiSvd3, &Svd3Params::default())
}

/// Polar decomposition `A = U P` with an explicit 3x3 SVD kernel.
///
/// # Arguments
///
/// * `a` - The input matrix.
/// * `kernel` - The SVD kernel used for 3x3 inputs.
/// * `params` - Parameters forwarded to the kernel.
///
/// # Errors
///
/// Propagates the kernel contract errors for 3x3 inputs.
pub fn polar_decompose_with<T: Scalar, K: Svd3Kernel<T> + ?Sized>(
    a: &SmallMatrix<T>,
    kernel: &K,
    params: &Svd3Params,
) -> Result<Polar<SmallMatrix<T>>, LinalgError> {
    match a {
        SmallMatrix::Mat2(m) => Ok(polar_decompose2(m).map(SmallMatrix::Mat2)),
        SmallMatrix::Mat3(m) => Ok(polar_decompose3(m, kernel, params)?.map(SmallMatrix::Mat3)),
    }
}

/// Singular value decomposition `A = U Σ Vᵀ` using the native 3x3 SVD kernel.
///
/// # Errors
///
/// See [`svd_with`].
pub fn svd<T: Scalar>(a: &SmallMatrix<T>) -> Result<Svd<SmallMatrix<T>>, LinalgError> {
    svd_with(a, &JacobiSvd3, &Svd3Params::default())
}

/// Singular value decomposition `A = U Σ Vᵀ` with an explicit 3x3 SVD kernel.
///
/// # Arguments
///
/// * `a` - The input matrix.
/// * `kernel` - The SVD kernel used for 3x3 inputs.
/// * `params` - Parameters forwarded to the kernel.
///
/// # Errors
///
/// Propagates the kernel contract errors for 3x3 inputs.
pub fn svd_with<T: Scalar, K: Svd3Kernel<T> + ?Sized>(
    a: &SmallMatrix<T>,
    kernel: &K,
    params: &Svd3Params,
) -> Result<Svd<SmallMatrix<T>>, LinalgError> {
    match a {
        SmallMatrix::Mat2(m) => Ok(svd2(m).map(SmallMatrix::Mat2)),
        SmallMatrix::Mat3(m) => Ok(svd3(m, kernel, params)?.map(SmallMatrix::Mat3)),
    }
}

/// Eigenvalues and right eigenvectors of a general matrix.
///
/// # Errors
///
/// [`LinalgError::UnsupportedDimension`] for 3x3 inputs, only 2x2 is implemented.
pub fn eig<T: Scalar>(a: &SmallMatrix<T>) -> Result<GeneralEigen<T>, LinalgError> {
    match a {
        SmallMatrix::Mat2(m) => Ok(eig2(m)),
        SmallMatrix::Mat3(_) => Err(LinalgError::UnsupportedDimension { op: "eig", size: 3 }),
    }
}

/// Eigenvalues and eigenvectors of a symmetric matrix.
///
/// # Errors
///
/// [`LinalgError::NotSymmetric`] if `a` differs from its transpose.
pub fn sym_eig<T: Scalar>(
    a: &SmallMatrix<T>,
) -> Result<SymEigen<SmallVector<T>, SmallMatrix<T>>, LinalgError> {
    Ok(match a {
        SmallMatrix::Mat2(m) => {
            let eig = sym_eig2(m)?;
            SymEigen {
                eigenvalues: eig.eigenvalues.into(),
                eigenvectors: eig.eigenvectors.into(),
            }
        }
        SmallMatrix::Mat3(m) => {
            let eig = sym_eig3(m)?;
            SymEigen {
                eigenvalues: eig.eigenvalues.into(),
                eigenvectors: eig.eigenvectors.into(),
            }
        }
    })
}

impl<T: Scalar> SymEigen<SmallVector<T>, SmallMatrix<T>> {
    /// Reorder the eigenpairs by decreasing eigenvalue.
    pub fn sorted_descending(&self) -> Self {
        match (self.eigenvalues, self.eigenvectors) {
            (SmallVector::Vec2(eigenvalues), SmallMatrix::Mat2(eigenvectors)) => {
                let sorted = SymEigen {
                    eigenvalues,
                    eigenvectors,
                }
                .sorted_descending();
                SymEigen {
                    eigenvalues: sorted.eigenvalues.into(),
                    eigenvectors: sorted.eigenvectors.into(),
                }
            }
            (SmallVector::Vec3(eigenvalues), SmallMatrix::Mat3(eigenvectors)) => {
                let sorted = SymEigen {
                    eigenvalues,
                    eigenvectors,
                }
                .sorted_descending();
                SymEigen {
                    eigenvalues: sorted.eigenvalues.into(),
                    eigenvectors: sorted.eigenvectors.into(),
                }
            }
            // mixed sizes are never produced by `sym_eig`
            _ => *self,
        }
    }
}

/// Solve the linear system `A x = b`.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `b` does not match the size of `a`.
/// * [`LinalgError::Singular`] if `a` is singular.
///
/// # Example
///
/// ```
/// use kornia_linalg::{solve, SmallMatrix, SmallVector};
///
/// let a = SmallMatrix::from_rows(&[[2.0f64, 1.0], [1.0, 3.0]]).unwrap();
/// let b = SmallVector::from_slice(&[3.0, 5.0]).unwrap();
/// let x = solve(&a, &b).unwrap();
/// assert!((x.as_slice()[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve<T: Scalar>(
    a: &SmallMatrix<T>,
    b: &SmallVector<T>,
) -> Result<SmallVector<T>, LinalgError> {
    match (a, b) {
        (SmallMatrix::Mat2(a), SmallVector::Vec2(b)) => Ok(solve2(a, b)?.into()),
        (SmallMatrix::Mat3(a), SmallVector::Vec3(b)) => Ok(solve3(a, b)?.into()),
        _ => Err(LinalgError::DimensionMismatch {
            matrix: a.size(),
            vector: b.len(),
        }),
    }
}
