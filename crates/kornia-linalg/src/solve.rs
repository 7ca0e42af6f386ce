//! Direct solvers for `A x = b` by Gaussian elimination with partial pivoting.

use crate::error::LinalgError;
use crate::matrix::{Mat2, Mat3, Vec2, Vec3};
use crate::scalar::Scalar;

/// Eliminate the augmented 2x3 system `[A | b]` and back-substitute.
///
/// Returns `None` when either pivot is exactly zero.
fn gauss_elimination_2x2<T: Scalar>(mut ab: [[T; 3]; 2]) -> Option<Vec2<T>> {
    if ab[0][0].abs() < ab[1][0].abs() {
        ab.swap(0, 1);
    }
    if ab[0][0] == T::zero() {
        return None;
    }

    let scale = ab[1][0] / ab[0][0];
    ab[1][0] = T::zero();
    for k in 1..3 {
        ab[1][k] = ab[1][k] - ab[0][k] * scale;
    }
    if ab[1][1] == T::zero() {
        return None;
    }

    // back substitution
    let x1 = ab[1][2] / ab[1][1];
    let x0 = (ab[0][2] - ab[0][1] * x1) / ab[0][0];
    Some(Vec2::new(x0, x1))
}

/// Eliminate the augmented 3x4 system `[A | b]` and back-substitute.
///
/// Returns `None` when a chosen pivot is exactly zero.
fn gauss_elimination_3x3<T: Scalar>(mut ab: [[T; 4]; 3]) -> Option<Vec3<T>> {
    for i in 0..3 {
        let mut max_row = i;
        let mut max_v = ab[i][i].abs();
        for (j, row) in ab.iter().enumerate().skip(i + 1) {
            if row[i].abs() > max_v {
                max_row = j;
                max_v = row[i].abs();
            }
        }
        if max_row != i {
            ab.swap(i, max_row);
        }
        if ab[i][i] == T::zero() {
            return None;
        }
        for j in i + 1..3 {
            let scale = ab[j][i] / ab[i][i];
            ab[j][i] = T::zero();
            for k in i + 1..4 {
                ab[j][k] = ab[j][k] - ab[i][k] * scale;
            }
        }
    }

    // back substitution
    let mut x = Vec3::zeros();
    for i in (0..3).rev() {
        let mut acc = ab[i][3];
        for k in i + 1..3 {
            acc = acc - ab[i][k] * x[k];
        }
        x[i] = acc / ab[i][i];
    }
    Some(x)
}

/// Solve the 2x2 system `A x = b`.
///
/// # Arguments
///
/// * `a` - The system matrix.
/// * `b` - The right-hand side.
///
/// # Errors
///
/// [`LinalgError::Singular`] if elimination meets a zero pivot.
///
/// # Example
///
/// ```
/// use kornia_linalg::{solve2, Mat2, Vec2};
///
/// let a = Mat2::<f64>::from_rows([[2.0, 1.0], [1.0, 3.0]]);
/// let x = solve2(&a, &Vec2::new(3.0, 5.0)).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12 && (x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve2<T: Scalar>(a: &Mat2<T>, b: &Vec2<T>) -> Result<Vec2<T>, LinalgError> {
    let m = a.to_rows();
    let ab = [[m[0][0], m[0][1], b[0]], [m[1][0], m[1][1], b[1]]];
    gauss_elimination_2x2(ab).ok_or_else(|| {
        log::debug!("singular 2x2 system: {:?}", a);
        LinalgError::Singular
    })
}

/// Solve the 3x3 system `A x = b`.
///
/// # Arguments
///
/// * `a` - The system matrix.
/// * `b` - The right-hand side.
///
/// # Errors
///
/// [`LinalgError::Singular`] if elimination meets a zero pivot.
pub fn solve3<T: Scalar>(a: &Mat3<T>, b: &Vec3<T>) -> Result<Vec3<T>, LinalgError> {
    let m = a.to_rows();
    let ab = [
        [m[0][0], m[0][1], m[0][2], b[0]],
        [m[1][0], m[1][1], m[1][2], b[1]],
        [m[2][0], m[2][1], m[2][2], b[2]],
    ];
    gauss_elimination_3x3(ab).ok_or_else(|| {
        log::debug!("singular 3x3 system: {:?}", a);
        LinalgError::Singular
    })
}
