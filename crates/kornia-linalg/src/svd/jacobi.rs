//! Native 3x3 SVD kernel.
//!
//! Jacobi eigenanalysis of `AᵀA` followed by a Givens QR decomposition of
//! `A V`, as described in:
//!
//! * McAdams, Selle, Tamstorf, Teran, and Sifakis (2011).
//!   "Computing the Singular Value Decomposition of 3x3 matrices with minimal
//!   branching and elementary floating point operations."
//!   University of Wisconsin-Madison Technical Report TR1690.

use super::{Svd3Kernel, SVD3_OUTPUT_LEN};
use crate::matrix::Mat3;
use crate::scalar::Scalar;

// 3 + 2 * sqrt(2)
const GAMMA: f64 = 5.828_427_124_746_19;
// cos(pi / 8)
const CSTAR: f64 = 0.923_879_532_511_286_7;
// sin(pi / 8)
const SSTAR: f64 = 0.382_683_432_365_089_8;

/// Jacobi/QR kernel for the 3x3 SVD.
///
/// Each iteration is one Jacobi sweep over the `(0, 1)`, `(1, 2)` and
/// `(2, 0)` planes of `AᵀA`. Exactly the requested number of sweeps is run,
/// there is no convergence test. Singular values come out approximately in
/// descending order and the returned `V` is a proper rotation.
///
/// # Example
///
/// ```
/// use kornia_linalg::{svd3, JacobiSvd3, Mat3, Svd3Params, Vec3};
///
/// let a = Mat3::from_diagonal(Vec3::new(3.0f32, 1.0, 2.0));
/// let svd = svd3(&a, &JacobiSvd3, &Svd3Params::default()).unwrap();
/// assert!((svd.sigma[(0, 0)] - 3.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JacobiSvd3;

impl<T: Scalar> Svd3Kernel<T> for JacobiSvd3 {
    fn decompose(&self, a: &[T; 9], iterations: u32) -> [T; SVD3_OUTPUT_LEN] {
        // the Givens thresholds are absolute, so work on A / max|aᵢⱼ|
        let a = Mat3::from_row_major(a);
        let scale = a.max_abs();
        let scale = if scale > T::zero() { scale } else { T::one() };
        let a = a * scale.recip();

        // V diagonalizes AᵀA
        let mut v = jacobi_eigenanalysis(&(a.transpose() * a), iterations);
        let mut b = a * v;
        sort_singular_values(&mut b, &mut v);

        let (mut u, r) = qr_decomposition(b);
        let mut sigma = [T::zero(); 3];
        for (i, s) in sigma.iter_mut().enumerate() {
            if r[(i, i)] < T::zero() {
                u.set_col(i, -u.col(i));
            }
            *s = r[(i, i)].abs() * scale;
        }

        let mut out = [T::zero(); SVD3_OUTPUT_LEN];
        out[..9].copy_from_slice(&u.to_row_major());
        out[9..18].copy_from_slice(&v.to_row_major());
        out[18..].copy_from_slice(&sigma);
        out
    }
}

/// Accumulated Jacobi rotation.
#[derive(Debug, Clone, Copy)]
struct Quaternion<T> {
    v: [T; 3],
    w: T,
}

impl<T: Scalar> Quaternion<T> {
    fn identity() -> Self {
        Self {
            v: [T::zero(); 3],
            w: T::one(),
        }
    }

    fn to_rotation(self) -> Mat3<T> {
        let norm = (self.v[0] * self.v[0] + self.v[1] * self.v[1] + self.v[2] * self.v[2]
            + self.w * self.w)
            .sqrt();
        let [x, y, z] = self.v.map(|c| c / norm);
        let w = self.w / norm;
        let (one, two) = (T::one(), T::lit(2.0));

        Mat3::from_rows([
            [
                one - two * (y * y + z * z),
                two * (x * y - z * w),
                two * (x * z + y * w),
            ],
            [
                two * (x * y + z * w),
                one - two * (x * x + z * z),
                two * (y * z - x * w),
            ],
            [
                two * (x * z - y * w),
                two * (y * z + x * w),
                one - two * (x * x + y * y),
            ],
        ])
    }
}

/// Half-angle Givens parameters `(cos, sin)` approximately annihilating `s_pq`.
///
/// Falls back to the `pi / 8` rotation when the approximation is inaccurate.
#[inline(always)]
fn approximate_givens_parameters<T: Scalar>(s_pp: T, s_qq: T, s_pq: T) -> (T, T) {
    let ch = T::lit(2.0) * (s_pp - s_qq);
    let sh = s_pq;
    if T::lit(GAMMA) * sh * sh < ch * ch {
        let w = (ch * ch + sh * sh).sqrt().recip();
        (w * ch, w * sh)
    } else {
        (T::lit(CSTAR), T::lit(SSTAR))
    }
}

/// Rotate the `(p, q)` plane of the symmetric matrix `s` and accumulate the
/// rotation into `quat`.
///
/// `(p, q, k)` must be a cyclic permutation of `(0, 1, 2)` so the plane
/// rotation is a positive rotation about axis `k`.
#[inline(always)]
fn conjugate<T: Scalar>(
    s: &mut [[T; 3]; 3],
    quat: &mut Quaternion<T>,
    (p, q, k): (usize, usize, usize),
) {
    let (ch, sh) = approximate_givens_parameters(s[p][p], s[q][q], s[q][p]);

    let ch2 = ch * ch;
    let sh2 = sh * sh;
    let scale = (ch2 + sh2).recip();
    let a = (ch2 - sh2) * scale;
    let b = T::lit(2.0) * sh * ch * scale;

    let (spp, sqp, sqq, skp, skq) = (s[p][p], s[q][p], s[q][q], s[k][p], s[k][q]);
    let new_pp = a * (a * spp + b * sqp) + b * (a * sqp + b * sqq);
    let new_qp = a * (-b * spp + a * sqp) + b * (-b * sqp + a * sqq);
    let new_qq = -b * (-b * spp + a * sqp) + a * (-b * sqp + a * sqq);
    let new_kp = a * skp + b * skq;
    let new_kq = -b * skp + a * skq;

    s[p][p] = new_pp;
    s[q][q] = new_qq;
    s[q][p] = new_qp;
    s[p][q] = new_qp;
    s[k][p] = new_kp;
    s[p][k] = new_kp;
    s[k][q] = new_kq;
    s[q][k] = new_kq;

    let (n, m) = ((k + 1) % 3, (k + 2) % 3);
    let Quaternion { v, w } = *quat;
    quat.v[k] = v[k] * ch + w * sh;
    quat.w = w * ch - v[k] * sh;
    quat.v[n] = v[n] * ch + v[m] * sh;
    quat.v[m] = v[m] * ch - v[n] * sh;
}

/// Eigenvectors of the symmetric `s` after `sweeps` Jacobi sweeps.
fn jacobi_eigenanalysis<T: Scalar>(s: &Mat3<T>, sweeps: u32) -> Mat3<T> {
    let mut s = s.to_rows();
    let mut quat = Quaternion::identity();
    for _ in 0..sweeps {
        conjugate(&mut s, &mut quat, (0, 1, 2));
        conjugate(&mut s, &mut quat, (1, 2, 0));
        conjugate(&mut s, &mut quat, (2, 0, 1));
    }
    quat.to_rotation()
}

/// Move column `k` to `i` and the negated column `i` to `k`, keeping the determinant.
#[inline(always)]
fn swap_columns<T: Scalar>(m: &mut Mat3<T>, i: usize, k: usize) {
    let tmp = m.col(i);
    m.set_col(i, m.col(k));
    m.set_col(k, -tmp);
}

/// Sort the columns of `b` by decreasing norm, permuting `v` alongside.
fn sort_singular_values<T: Scalar>(b: &mut Mat3<T>, v: &mut Mat3<T>) {
    let mut rho = [0, 1, 2].map(|j| b.col(j).norm_squared());
    for (i, k) in [(0, 1), (0, 2), (1, 2)] {
        if rho[i] < rho[k] {
            rho.swap(i, k);
            swap_columns(b, i, k);
            swap_columns(v, i, k);
        }
    }
}

/// Givens rotation `(cos, sin)` zeroing `a2` against the pivot `a1`.
#[inline(always)]
fn qr_givens_rotation<T: Scalar>(a1: T, a2: T) -> (T, T) {
    let epsilon = T::lit(8.0) * T::epsilon();
    let rho = (a1 * a1 + a2 * a2).sqrt();

    let mut ch = a1.abs() + rho.max(epsilon);
    let mut sh = if rho > epsilon { a2 } else { T::zero() };
    if a1 < T::zero() {
        std::mem::swap(&mut ch, &mut sh);
    }

    let w = (ch * ch + sh * sh).sqrt().recip();
    let (ch, sh) = (ch * w, sh * w);
    (T::one() - T::lit(2.0) * sh * sh, T::lit(2.0) * ch * sh)
}

/// QR decomposition `b = Q R` with three Givens rotations.
fn qr_decomposition<T: Scalar>(mut r: Mat3<T>) -> (Mat3<T>, Mat3<T>) {
    let mut q = Mat3::identity();
    for (i, k) in [(0, 1), (0, 2), (1, 2)] {
        let (c, s) = qr_givens_rotation(r[(i, i)], r[(k, i)]);
        for j in 0..3 {
            let (x, y) = (r[(i, j)], r[(k, j)]);
            r[(i, j)] = c * x + s * y;
            r[(k, j)] = -s * x + c * y;
        }
        let (x, y) = (q.col(i), q.col(k));
        q.set_col(i, x * c + y * s);
        q.set_col(k, y * c - x * s);
    }
    (q, r)
}
