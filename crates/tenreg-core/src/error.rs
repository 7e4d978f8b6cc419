//! Shape errors raised by tensor construction and matricization

use thiserror::Error;

/// Failure to interpret data under a requested shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The number of elements does not match the product of the shape.
    #[error("Shape {shape:?} requires {expected} elements, but got {actual}")]
    ElementCount {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Matricization needs a leading sample axis.
    #[error("Tensor of rank 0 has no sample axis")]
    MissingSampleAxis,

    /// A matrix cannot be folded into the requested trailing shape.
    #[error("Matrix shape {matrix:?} incompatible with trailing shape {trailing:?}")]
    FoldMismatch {
        matrix: [usize; 2],
        trailing: Vec<usize>,
    },

    /// Storage layout rejected by the array backend.
    #[error("Layout error: {0}")]
    Layout(String),
}
