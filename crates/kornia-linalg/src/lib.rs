#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Entry points that dispatch on the runtime matrix size.
pub mod dispatch;

/// Eigendecomposition of general 2x2 matrices.
pub mod eig;

/// Error types for the linalg module.
pub mod error;

/// Fixed-size matrix and vector types.
pub mod matrix;

/// Polar decomposition.
pub mod polar;

/// Standard normal random numbers.
pub mod random;

/// Floating point scalar abstraction.
pub mod scalar;

/// Runtime-sized wrappers over the fixed-size types.
pub mod small;

/// Linear system solvers.
pub mod solve;

/// Singular value decomposition.
pub mod svd;

/// Eigendecomposition of symmetric matrices.
pub mod sym_eig;

pub use dispatch::{eig, polar_decompose, polar_decompose_with, solve, svd, svd_with, sym_eig};
pub use eig::{eig2, GeneralEigen};
pub use error::LinalgError;
pub use matrix::{GlamMatrix, GlamVector, GlamVector3, Mat2, Mat3, Vec2, Vec3};
pub use polar::{polar_decompose2, polar_decompose3, Polar};
pub use random::{randn, randn_with};
pub use scalar::{DefaultFloat, Scalar};
pub use small::{SmallMatrix, SmallVector};
pub use solve::{solve2, solve3};
pub use svd::{
    assemble_svd3, svd2, svd3, JacobiSvd3, Svd, Svd3Kernel, Svd3Params, SVD3_OUTPUT_LEN,
};
pub use sym_eig::{sym_eig2, sym_eig3, SymEigen};
