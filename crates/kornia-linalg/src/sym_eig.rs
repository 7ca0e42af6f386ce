//! Eigendecomposition of real symmetric 2x2 and 3x3 matrices.
//!
//! The 3x3 eigenvalues use Cardano's trigonometric solution of the
//! characteristic cubic and the eigenvectors a cross product construction, see
//! Kopp (2008), "Efficient numerical diagonalization of hermitian 3x3
//! matrices", Int. J. Mod. Phys. C 19, 523-548.

use crate::eig::dominant_column;
use crate::error::LinalgError;
use crate::matrix::{Mat2, Mat3, Vec2, Vec3};
use crate::scalar::Scalar;

/// Eigenvalues and orthonormal eigenvectors of a symmetric matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymEigen<V, M> {
    /// The eigenvalues.
    pub eigenvalues: V,
    /// The eigenvectors, as columns in the order of `eigenvalues`.
    pub eigenvectors: M,
}

macro_rules! impl_sorted_descending {
    ($vec_type:ident, $mat_type:ident, $n:literal) => {
        impl<T: Scalar> SymEigen<$vec_type<T>, $mat_type<T>> {
            /// Reorder the eigenpairs by decreasing eigenvalue.
            pub fn sorted_descending(&self) -> Self {
                let mut order: [usize; $n] = std::array::from_fn(|i| i);
                order.sort_by(|&i, &j| {
                    self.eigenvalues[j]
                        .partial_cmp(&self.eigenvalues[i])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

                let mut sorted = *self;
                for (dst, &src) in order.iter().enumerate() {
                    sorted.eigenvalues[dst] = self.eigenvalues[src];
                    sorted.eigenvectors.set_col(dst, self.eigenvectors.col(src));
                }
                sorted
            }
        }
    };
}

impl_sorted_descending!(Vec2, Mat2, 2);
impl_sorted_descending!(Vec3, Mat3, 3);

fn check_symmetric(symmetric: bool) -> Result<(), LinalgError> {
    if symmetric {
        Ok(())
    } else {
        Err(LinalgError::NotSymmetric { op: "sym_eig" })
    }
}

/// Divisor that brings the largest entry to one, or one for the zero matrix.
fn prescale<T: Scalar>(max_abs: T) -> T {
    if max_abs > T::zero() {
        max_abs
    } else {
        T::one()
    }
}

/// Eigendecomposition of a symmetric 2x2 matrix.
///
/// The matrix is divided by its largest absolute entry before the closed
/// form, and the eigenvalues are scaled back, so entries near the limits of
/// the precision neither overflow nor flush to zero. The eigenvalues are
/// `(tr ± √gap) / 2`, larger first, with the discriminant clamped at zero.
/// Multiples of the identity return the canonical vectors `(0, 1)` and `(1, 0)`.
///
/// # Errors
///
/// [`LinalgError::NotSymmetric`] if `a` differs from its transpose.
pub fn sym_eig2<T: Scalar>(a: &Mat2<T>) -> Result<SymEigen<Vec2<T>, Mat2<T>>, LinalgError> {
    check_symmetric(a.is_symmetric())?;

    let scale = prescale(a.max_abs());
    let a = *a * scale.recip();

    let tr = a.trace();
    let det = a.determinant();
    let gap = (tr * tr - T::lit(4.0) * det).max(T::zero()).sqrt();
    let half = T::lit(0.5);
    let (lambda1, lambda2) = ((tr + gap) * half, (tr - gap) * half);

    let (c2, n2) = dominant_column(&(a - Mat2::identity() * lambda2));
    let (c1, n1) = dominant_column(&(a - Mat2::identity() * lambda1));

    let (v1, v2) = if n1 == T::zero() && n2 == T::zero() {
        log::trace!("sym_eig2: multiple of the identity, using the canonical basis");
        (Vec2::new(T::zero(), T::one()), Vec2::new(T::one(), T::zero()))
    } else if n2 >= n1 {
        let v1 = c2 * n2.sqrt().recip();
        (v1, Vec2::new(-v1[1], v1[0]))
    } else {
        let v2 = c1 * n1.sqrt().recip();
        (Vec2::new(v2[1], -v2[0]), v2)
    };

    Ok(SymEigen {
        eigenvalues: Vec2::new(lambda1, lambda2) * scale,
        eigenvectors: Mat2::from_cols(v1, v2),
    })
}

/// Roots of the characteristic cubic of the symmetric `a`.
///
/// In exact arithmetic they come out as `w[0] >= w[1] >= w[2]`.
fn cardano_eigenvalues<T: Scalar>(a: &Mat3<T>) -> Vec3<T> {
    let m = a.to_rows();
    let lit = T::lit;

    let dd = m[0][1] * m[0][1];
    let ee = m[1][2] * m[1][2];
    let ff = m[0][2] * m[0][2];
    let trace = a.trace();
    let c1 = m[0][0] * m[1][1] + m[0][0] * m[2][2] + m[1][1] * m[2][2] - (dd + ee + ff);
    let c0 = m[2][2] * dd + m[0][0] * ee + m[1][1] * ff
        - m[0][0] * m[1][1] * m[2][2]
        - lit(2.0) * m[0][2] * m[0][1] * m[1][2];

    let p = trace * trace - lit(3.0) * c1;
    let q = trace * (p - lit(1.5) * c1) - lit(13.5) * c0;
    let sqrt_p = p.abs().sqrt();

    let disc = lit(27.0) * (lit(0.25) * c1 * c1 * (p - c1) + c0 * (q + lit(6.75) * c0));
    let phi = disc.abs().sqrt().atan2(q) / lit(3.0);

    let c = sqrt_p * phi.cos();
    let s = sqrt_p * phi.sin() / lit(3.0).sqrt();

    let w2 = (trace - c) / lit(3.0);
    Vec3::new(w2 + c, w2 + s, w2 - s)
}

/// Unit vector orthogonal to the non-zero `u`.
fn any_orthogonal<T: Scalar>(u: &Vec3<T>) -> Vec3<T> {
    let mut j = 0;
    for i in 1..3 {
        if u[i].abs() > u[j].abs() {
            j = i;
        }
    }
    let k = (j + 1) % 3;
    let scale = (u[j] * u[j] + u[k] * u[k]).sqrt().recip();
    let mut v = Vec3::zeros();
    v[j] = u[k] * scale;
    v[k] = -u[j] * scale;
    v
}

/// Unit null vector of `a - w I`, for a simple eigenvalue `w`.
///
/// The null vector is orthogonal to every column, so it is taken along the
/// largest cross product of two columns. A column below `thresh` is itself a
/// null direction, and when all columns are parallel any vector orthogonal to
/// them will do.
fn null_vector<T: Scalar>(a: &Mat3<T>, w: T, thresh: T) -> Vec3<T> {
    let b = *a - Mat3::identity() * w;
    let cols = [b.col(0), b.col(1), b.col(2)];
    let norms = cols.map(|c| c.norm_squared());

    if let Some(i) = (0..3).find(|&i| norms[i] <= thresh) {
        let mut e = Vec3::zeros();
        e[i] = T::one();
        return e;
    }

    let mut best = (Vec3::zeros(), T::zero(), T::one());
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let v = cols[i].cross(&cols[j]);
        let d = v.norm_squared();
        if d > best.1 {
            best = (v, d, norms[i] * norms[j]);
        }
    }
    let (v, d, error) = best;
    let tolerance = T::lit(64.0) * T::epsilon();
    if d >= tolerance * tolerance * error && d > T::zero() {
        return v * d.sqrt().recip();
    }

    log::trace!("sym_eig3: parallel columns, picking an orthogonal direction");
    let dominant = (0..3).fold(0, |m, i| if norms[i] > norms[m] { i } else { m });
    any_orthogonal(&cols[dominant])
}

/// Unit eigenvector of `w`, orthogonal to the eigenvector `v0`.
///
/// Every column of `a - w I` lies in the span of `v0` and the remaining
/// eigenvector, so its cross product with `v0` is along the wanted one. When
/// all of them vanish, `w` is a double eigenvalue and any vector orthogonal
/// to `v0` is an eigenvector.
///
/// A nearly repeated `w` leaves a cross product of only a few ulps, so the
/// component along `v0` is projected out before normalizing.
fn orthogonal_eigenvector<T: Scalar>(a: &Mat3<T>, w: T, v0: &Vec3<T>, thresh: T) -> Vec3<T> {
    let b = *a - Mat3::identity() * w;
    let tolerance = T::lit(256.0) * T::epsilon();

    let mut best: Option<(Vec3<T>, T)> = None;
    for i in 0..3 {
        let col = b.col(i);
        let n = col.norm_squared();
        if n <= thresh {
            continue;
        }
        let v = v0.cross(&col);
        let d = v.norm_squared();
        if d > tolerance * tolerance * n && best.map_or(true, |(_, best_d)| d > best_d) {
            best = Some((v, d));
        }
    }

    match best {
        Some((v, d)) => {
            let v = v * d.sqrt().recip();
            let v = v - *v0 * v0.dot(&v);
            v * v.norm().recip()
        }
        None => {
            log::trace!("sym_eig3: degenerate eigenvalue pair, completing the basis");
            any_orthogonal(v0)
        }
    }
}

/// Eigendecomposition of a symmetric 3x3 matrix.
///
/// The matrix is divided by its largest absolute entry so the invariants of
/// the characteristic cubic stay in range; the eigenvalues are scaled back.
/// They are returned in the order produced by the trigonometric formula,
/// which is descending up to rounding; use [`SymEigen::sorted_descending`]
/// when a strict order matters. The eigenvectors form a rotation matrix. The
/// zero matrix returns zero eigenvalues and the identity.
///
/// # Errors
///
/// [`LinalgError::NotSymmetric`] if `a` differs from its transpose.
///
/// # Example
///
/// ```
/// use kornia_linalg::{sym_eig3, Mat3, Vec3};
///
/// let a = Mat3::from_diagonal(Vec3::new(1.0, 2.0, 3.0));
/// let eig = sym_eig3(&a).unwrap();
/// assert!((eig.eigenvalues - Vec3::new(3.0, 2.0, 1.0)).norm() < 1e-12);
/// ```
pub fn sym_eig3<T: Scalar>(a: &Mat3<T>) -> Result<SymEigen<Vec3<T>, Mat3<T>>, LinalgError> {
    check_symmetric(a.is_symmetric())?;

    if a.is_zero() {
        log::trace!("sym_eig3: zero matrix");
        return Ok(SymEigen {
            eigenvalues: Vec3::zeros(),
            eigenvectors: Mat3::identity(),
        });
    }

    let scale = prescale(a.max_abs());
    let a = *a * scale.recip();

    let w = cardano_eigenvalues(&a);
    let wmax = w.as_slice().iter().fold(T::zero(), |acc, x| acc.max(x.abs()));
    let thresh = (T::lit(8.0) * T::epsilon() * wmax).powi(2);

    let v0 = null_vector(&a, w[0], thresh);
    let v1 = orthogonal_eigenvector(&a, w[1], &v0, thresh);
    let v2 = v0.cross(&v1);

    Ok(SymEigen {
        eigenvalues: w * scale,
        eigenvectors: Mat3::from_cols(v0, v1, v2),
    })
}
