//! Error taxonomy for low-rank fitting
//!
//! Reaching the iteration cap is not an error; it is reported through
//! [`NonConvergenceWarning`](crate::NonConvergenceWarning) on an otherwise
//! successful result.

use tenreg_core::ShapeError;
use thiserror::Error;

/// Which step divided by a vanishing quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePhase {
    /// `v_r · v_r` in the `u_r` update
    UpdateU,
    /// `u_rᵀ G u_r` in the `v_r` update
    UpdateV,
    /// `‖u_r‖` or `‖v_r‖` in the rescaling step
    Normalize,
}

impl std::fmt::Display for DegeneratePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegeneratePhase::UpdateU => write!(f, "u-update"),
            DegeneratePhase::UpdateV => write!(f, "v-update"),
            DegeneratePhase::Normalize => write!(f, "normalization"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FitError {
    /// Input and output batches disagree on the number of samples
    #[error("Sample count mismatch: X has {x_samples} samples, Y has {y_samples}")]
    ShapeMismatch { x_samples: usize, y_samples: usize },

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// `XᵀX + λI` could not be inverted
    #[error("Regularized Gram matrix is singular: {0}")]
    SingularMatrix(String),

    /// A coordinate update or rescaling would divide by ~0
    #[error("Degenerate factor at rank {rank} during {phase}: divisor {value:e}")]
    DegenerateFactor {
        rank: usize,
        phase: DegeneratePhase,
        value: f64,
    },

    /// A weight tensor whose leading axes do not match the input sample shape
    #[error("Weight shape {weights:?} does not start with input sample shape {input:?}")]
    WeightShapeMismatch {
        input: Vec<usize>,
        weights: Vec<usize>,
    },

    #[error("Invalid rank: {0}")]
    InvalidRank(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
