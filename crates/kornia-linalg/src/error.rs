use thiserror::Error;

/// Error type for the small matrix kernels.
///
/// Every variant except [`LinalgError::Singular`] is a contract violation: the
/// caller passed something the kernels are not defined for. None of them are
/// retried or coerced; the current call simply fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinalgError {
    /// The operation is only defined for some matrix sizes.
    #[error("{op} does not support {size}x{size} matrices")]
    UnsupportedDimension {
        /// Name of the rejected operation.
        op: &'static str,
        /// Size of the matrix that was passed.
        size: usize,
    },

    /// The input matrix is not square.
    #[error("Only square matrices are supported, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The matrix and the right-hand side vector do not agree in size.
    #[error("Matrix and vector dimension mismatch: {matrix}x{matrix} matrix, {vector} element vector")]
    DimensionMismatch {
        /// Size of the matrix.
        matrix: usize,
        /// Number of elements of the vector.
        vector: usize,
    },

    /// A buffer does not hold the number of elements its shape requires.
    #[error("Expected {expected} elements, got {actual}")]
    InvalidLength {
        /// Number of elements required by the shape.
        expected: usize,
        /// Number of elements provided.
        actual: usize,
    },

    /// A symmetric routine was called with a non-symmetric matrix.
    #[error("{op} needs a symmetric matrix")]
    NotSymmetric {
        /// Name of the rejected operation.
        op: &'static str,
    },

    /// Gaussian elimination met an exactly zero pivot.
    #[error("Matrix is singular in linear solve")]
    Singular,

    /// The 3x3 SVD kernel returned the wrong number of scalars.
    #[error("3x3 SVD kernel must return 21 scalars, got {0}")]
    SvdOutputLength(usize),

    /// The 3x3 SVD kernel was asked to run zero iterations.
    #[error("3x3 SVD iteration count must be positive")]
    InvalidIterations,
}

impl LinalgError {
    /// Whether the error reports a broken precondition rather than a singular system.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, LinalgError::Singular)
    }
}
