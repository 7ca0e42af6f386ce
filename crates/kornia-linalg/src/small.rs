//! Runtime-sized inputs resolved once into the fixed-size kernels.
//!
//! Callers that only know the matrix size at runtime build a [`SmallMatrix`]
//! (or [`SmallVector`]) from a row-major buffer. Squareness and the supported
//! sizes are checked here, so the facade only has to match on the variant.

use crate::error::LinalgError;
use crate::matrix::{Mat2, Mat3, Vec2, Vec3};
use crate::scalar::{DefaultFloat, Scalar};

/// A square matrix of size 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmallMatrix<T: Scalar = DefaultFloat> {
    /// A 2x2 matrix.
    Mat2(Mat2<T>),
    /// A 3x3 matrix.
    Mat3(Mat3<T>),
}

/// A vector with 2 or 3 elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmallVector<T: Scalar = DefaultFloat> {
    /// A 2-element vector.
    Vec2(Vec2<T>),
    /// A 3-element vector.
    Vec3(Vec3<T>),
}

impl<T: Scalar> SmallMatrix<T> {
    /// Create a matrix from a row-major buffer of shape `rows x cols`.
    ///
    /// # Errors
    ///
    /// * [`LinalgError::InvalidLength`] if `data` does not hold `rows * cols` elements.
    /// * [`LinalgError::NotSquare`] if `rows != cols`.
    /// * [`LinalgError::UnsupportedDimension`] if the size is not 2 or 3.
    ///
    /// # Example
    ///
    /// ```
    /// use kornia_linalg::SmallMatrix;
    ///
    /// let a = SmallMatrix::from_row_slice(2, 2, &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(a.size(), 2);
    /// ```
    pub fn from_row_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, LinalgError> {
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidLength {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        if rows != cols {
            return Err(LinalgError::NotSquare { rows, cols });
        }
        match rows {
            2 => Ok(Self::Mat2(Mat2::from_rows([
                [data[0], data[1]],
                [data[2], data[3]],
            ]))),
            3 => Ok(Self::Mat3(Mat3::from_rows([
                [data[0], data[1], data[2]],
                [data[3], data[4], data[5]],
                [data[6], data[7], data[8]],
            ]))),
            size => Err(LinalgError::UnsupportedDimension {
                op: "from_row_slice",
                size,
            }),
        }
    }

    /// Create a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Same as [`SmallMatrix::from_row_slice`]; a ragged row reports
    /// [`LinalgError::NotSquare`] with that row's length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let n = rows.len();
        let mut data = [T::zero(); 9];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(LinalgError::NotSquare {
                    rows: n,
                    cols: row.len(),
                });
            }
            if n > 3 {
                return Err(LinalgError::UnsupportedDimension {
                    op: "from_rows",
                    size: n,
                });
            }
            data[i * n..(i + 1) * n].copy_from_slice(row);
        }
        Self::from_row_slice(n, n, &data[..n * n])
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        match self {
            Self::Mat2(_) => 2,
            Self::Mat3(_) => 3,
        }
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> T {
        match self {
            Self::Mat2(m) => m[(row, col)],
            Self::Mat3(m) => m[(row, col)],
        }
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Self {
        match self {
            Self::Mat2(m) => Self::Mat2(m.transpose()),
            Self::Mat3(m) => Self::Mat3(m.transpose()),
        }
    }
}

impl<T: Scalar> SmallVector<T> {
    /// Create a vector from a slice of 2 or 3 elements.
    ///
    /// # Errors
    ///
    /// [`LinalgError::UnsupportedDimension`] for any other length.
    pub fn from_slice(data: &[T]) -> Result<Self, LinalgError> {
        match *data {
            [x, y] => Ok(Self::Vec2(Vec2::new(x, y))),
            [x, y, z] => Ok(Self::Vec3(Vec3::new(x, y, z))),
            _ => Err(LinalgError::UnsupportedDimension {
                op: "from_slice",
                size: data.len(),
            }),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Vec2(_) => 2,
            Self::Vec3(_) => 3,
        }
    }

    /// Always `false`, a small vector holds 2 or 3 elements.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Vec2(v) => v.as_slice(),
            Self::Vec3(v) => v.as_slice(),
        }
    }
}

impl<T: Scalar> From<Mat2<T>> for SmallMatrix<T> {
    fn from(m: Mat2<T>) -> Self {
        Self::Mat2(m)
    }
}

impl<T: Scalar> From<Mat3<T>> for SmallMatrix<T> {
    fn from(m: Mat3<T>) -> Self {
        Self::Mat3(m)
    }
}

impl<T: Scalar> From<Vec2<T>> for SmallVector<T> {
    fn from(v: Vec2<T>) -> Self {
        Self::Vec2(v)
    }
}

impl<T: Scalar> From<Vec3<T>> for SmallVector<T> {
    fn from(v: Vec3<T>) -> Self {
        Self::Vec3(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_slice() -> Result<(), LinalgError> {
        let a = SmallMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])?;
        assert_eq!(a.size(), 3);
        assert_eq!(a.get(1, 2), 6.0);
        assert_eq!(a.transpose().get(2, 1), 6.0);
        Ok(())
    }

    #[test]
    fn test_from_row_slice_errors() {
        assert_eq!(
            SmallMatrix::from_row_slice(2, 3, &[0.0f32; 6]),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!(
            SmallMatrix::from_row_slice(4, 4, &[0.0f32; 16]),
            Err(LinalgError::UnsupportedDimension {
                op: "from_row_slice",
                size: 4
            })
        );
        assert_eq!(
            SmallMatrix::from_row_slice(1, 1, &[1.0f32]),
            Err(LinalgError::UnsupportedDimension {
                op: "from_row_slice",
                size: 1
            })
        );
        assert_eq!(
            SmallMatrix::from_row_slice(2, 2, &[0.0f32; 3]),
            Err(LinalgError::InvalidLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_from_rows() {
        let a = SmallMatrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]);
        assert_eq!(
            a,
            Ok(SmallMatrix::Mat2(Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]])))
        );

        let ragged: [&[f64]; 2] = [&[1.0, 2.0], &[3.0]];
        assert_eq!(
            SmallMatrix::from_rows(&ragged),
            Err(LinalgError::NotSquare { rows: 2, cols: 1 })
        );

        let big = [[0.0f32; 4]; 4];
        assert_eq!(
            SmallMatrix::from_rows(&big),
            Err(LinalgError::UnsupportedDimension {
                op: "from_rows",
                size: 4
            })
        );
    }

    #[test]
    fn test_small_vector() {
        let v = SmallVector::from_slice(&[1.0f32, 2.0, 3.0]);
        assert_eq!(v.map(|v| v.len()), Ok(3));
        assert_eq!(
            SmallVector::from_slice(&[1.0f32; 4]),
            Err(LinalgError::UnsupportedDimension {
                op: "from_slice",
                size: 4
            })
        );

        let v = SmallVector::from(Vec2::new(1.0f64, 2.0));
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
        assert!(!v.is_empty());
    }
}
