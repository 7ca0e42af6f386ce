//! Eigendecomposition of general real 2x2 matrices.

use crate::matrix::{Mat2, Vec2};
use crate::scalar::Scalar;
use num_complex::Complex;

/// Eigenvalues and right eigenvectors `A v = λ v` of a real 2x2 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralEigen<T> {
    /// The two eigenvalues. Complex eigenvalues come as a conjugate pair.
    pub values: [Complex<T>; 2],
    /// The unit eigenvectors, `vectors[i]` belonging to `values[i]`.
    pub vectors: [[Complex<T>; 2]; 2],
}

impl<T: Scalar> GeneralEigen<T> {
    /// Whether both eigenvalues have a zero imaginary part.
    pub fn is_real(&self) -> bool {
        self.values.iter().all(|v| v.im == T::zero())
    }

    /// The interleaved real layout of the decomposition.
    ///
    /// The eigenvalues are returned as rows `(re, im)` of a 2x2 matrix. The
    /// eigenvectors are the columns of a 4x2 array whose rows are
    /// `(re₀, im₀, re₁, im₁)`.
    pub fn to_packed(&self) -> (Mat2<T>, [[T; 2]; 4]) {
        let values = Mat2::from_rows(self.values.map(|v| [v.re, v.im]));
        let [v1, v2] = self.vectors;
        let vectors = [
            [v1[0].re, v2[0].re],
            [v1[0].im, v2[0].im],
            [v1[1].re, v2[1].re],
            [v1[1].im, v2[1].im],
        ];
        (values, vectors)
    }
}

/// The column of `m` with the larger norm and its squared norm.
///
/// By Cayley-Hamilton the columns of `A - λ₂ I` span the eigenspace of `λ₁`,
/// so either non-zero column is an eigenvector. The larger one is the better
/// conditioned choice.
pub(crate) fn dominant_column<T: Scalar>(m: &Mat2<T>) -> (Vec2<T>, T) {
    let (c0, c1) = (m.col(0), m.col(1));
    let (n0, n1) = (c0.norm_squared(), c1.norm_squared());
    if n0 >= n1 {
        (c0, n0)
    } else {
        (c1, n1)
    }
}

fn dominant_complex_column<T: Scalar>(m: [[Complex<T>; 2]; 2]) -> Option<[Complex<T>; 2]> {
    let column = |j: usize| [m[0][j], m[1][j]];
    let norm_sqr = |c: &[Complex<T>; 2]| c[0].norm_sqr() + c[1].norm_sqr();

    let (c0, c1) = (column(0), column(1));
    let (c, n) = if norm_sqr(&c0) >= norm_sqr(&c1) {
        (c0, norm_sqr(&c0))
    } else {
        (c1, norm_sqr(&c1))
    };
    if n == T::zero() {
        return None;
    }
    let norm = n.sqrt();
    Some(c.map(|x| x / norm))
}

/// `A - λ I` as a complex matrix.
fn shifted<T: Scalar>(a: &Mat2<T>, lambda: Complex<T>) -> [[Complex<T>; 2]; 2] {
    let mut m = a.to_rows().map(|row| row.map(|x| Complex::new(x, T::zero())));
    m[0][0] = m[0][0] - lambda;
    m[1][1] = m[1][1] - lambda;
    m
}

/// Pair the eigenvector constructions, replacing the ones that degenerated.
///
/// A single missing vector is completed orthogonally to the other. The
/// canonical pair `(0, 1)`, `(1, 0)` is used only when both vanish.
fn eigenvector_pair<T: Scalar>(
    v1: Option<[Complex<T>; 2]>,
    v2: Option<[Complex<T>; 2]>,
) -> [[Complex<T>; 2]; 2] {
    match (v1, v2) {
        (Some(v1), Some(v2)) => [v1, v2],
        (Some(v1), None) => [v1, complement(&v1)],
        (None, Some(v2)) => [complement(&v2), v2],
        (None, None) => {
            log::trace!("eig2: both shifted matrices vanish, using the canonical basis");
            let zero = Complex::new(T::zero(), T::zero());
            let one = Complex::new(T::one(), T::zero());
            [[zero, one], [one, zero]]
        }
    }
}

/// Unit vector orthogonal to the unit complex 2-vector `v`.
fn complement<T: Scalar>(v: &[Complex<T>; 2]) -> [Complex<T>; 2] {
    [-v[1].conj(), v[0].conj()]
}

/// Eigendecomposition of a real 2x2 matrix.
///
/// The matrix is divided by its largest absolute entry first, so `tr²` and
/// `det` stay in range, and the eigenvalues are scaled back at the end.
/// With `gap = tr² - 4 det`, a positive gap gives two real eigenvalues
/// `(tr ± √gap) / 2` in that order, otherwise the conjugate pair
/// `tr / 2 ± i √(-gap) / 2`. Each eigenvector is the larger column of `A`
/// shifted by the other eigenvalue, normalized as a complex 2-vector. When
/// both shifted matrices vanish (a multiple of the identity) the canonical
/// vectors `(0, 1)` and `(1, 0)` are used instead.
///
/// # Example
///
/// ```
/// use kornia_linalg::{eig2, Mat2};
///
/// let rotation = Mat2::from_rows([[0.0, -1.0], [1.0, 0.0]]);
/// let eig = eig2(&rotation);
/// assert!(!eig.is_real());
/// assert_eq!(eig.values[0].im, 1.0);
/// ```
pub fn eig2<T: Scalar>(a: &Mat2<T>) -> GeneralEigen<T> {
    let scale = a.max_abs();
    let scale = if scale > T::zero() { scale } else { T::one() };
    let a = *a * scale.recip();

    let tr = a.trace();
    let det = a.determinant();
    let gap = tr * tr - T::lit(4.0) * det;
    let half = T::lit(0.5);

    let values = if gap > T::zero() {
        let root = gap.sqrt();
        [
            Complex::new((tr + root) * half, T::zero()),
            Complex::new((tr - root) * half, T::zero()),
        ]
    } else {
        let root = (-gap).sqrt();
        [
            Complex::new(tr * half, root * half),
            Complex::new(tr * half, -root * half),
        ]
    };

    let vectors = eigenvector_pair(
        dominant_complex_column(shifted(&a, values[1])),
        dominant_complex_column(shifted(&a, values[0])),
    );

    GeneralEigen {
        values: values.map(|v| v * scale),
        vectors,
    }
}
