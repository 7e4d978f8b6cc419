//! # tenreg-core
//!
//! Core tensor type and matricization for low-rank tensor regression.
//!
//! - **Dense tensor representation** ([`DenseND`]), always row-major
//! - **Sample-axis matricization**: [`DenseND::unfold_samples`] maps an
//!   `(N, d_1, ..., d_k)` batch to an `(N, d_1 * ... * d_k)` matrix and
//!   [`DenseND::fold_samples`] inverts it exactly
//! - **Seedable random creation** for reproducible initialization
//!
//! ## SciRS2 Integration
//!
//! Array storage and random number generation go through `scirs2-core`.
//! Direct use of `ndarray` or `rand` is avoided.
//!
//! ## Quick Start
//!
//! ```
//! use tenreg_core::DenseND;
//!
//! // A batch of 4 samples, each a 2x3 matrix
//! let batch = DenseND::<f64>::from_fn(&[4, 2, 3], |idx| (idx[0] + idx[1] * idx[2]) as f64);
//!
//! let mat = batch.unfold_samples().unwrap();
//! assert_eq!(mat.shape(), &[4, 6]);
//!
//! let back = DenseND::fold_samples(&mat, &[2, 3]).unwrap();
//! assert_eq!(back, batch);
//! ```
//!
//! ## Error Handling
//!
//! Shape violations surface as [`ShapeError`]:
//!
//! ```
//! use tenreg_core::{DenseND, ShapeError};
//!
//! let err = DenseND::from_vec(vec![1.0, 2.0, 3.0], &[2, 2]).unwrap_err();
//! assert!(matches!(err, ShapeError::ElementCount { expected: 4, actual: 3, .. }));
//! ```

#![deny(warnings)]

pub mod dense;
pub mod error;

#[cfg(test)]
mod property_tests;

pub use dense::DenseND;
pub use error::ShapeError;
