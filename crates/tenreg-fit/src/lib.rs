//! # tenreg-fit - Low-Rank Tensor Regression
//!
//! Fits a linear map between two batches of tensors under a CP-rank
//! constraint:
//!
//! ```text
//! Y[n] ≈ ⟨X[n], W⟩,   W = Σᵣ u_r ⊗ v_r   (r = 0..R-1)
//! ```
//!
//! with ridge regularization λ‖W‖². `W` is never optimized directly; its
//! R factor pairs are updated by alternating least squares (block
//! coordinate descent) until the regularized training MSE stabilizes.
//!
//! ## Components
//!
//! - [`RegularizedOperators`]: `G = XᵀX + λI`, `G⁻¹`, `C = XᵀY`, built once
//! - [`FactorUpdateEngine`]: Gauss–Seidel sweeps over the [`FactorSet`]
//! - [`stabilize`]: norm balancing of each pair after a sweep
//! - [`ConvergenceMonitor`]: error tracking, termination, progress reports
//! - [`reconstruct_weights`]: folds `Σᵣ u_r v_rᵀ` into the weight tensor
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::random::{SeedableRng, StdRng};
//! use tenreg_core::DenseND;
//! use tenreg_fit::{fit_with, ErrorHistory, FitConfig};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let x = DenseND::<f64>::random_normal(&[30, 4, 3], 0.0, 1.0, &mut rng);
//! let y = DenseND::<f64>::random_normal(&[30, 2], 0.0, 1.0, &mut rng);
//!
//! let config = FitConfig::new(2).with_lambda(1.0);
//! let mut history = ErrorHistory::new();
//! let result = fit_with(&x, &y, &config, &mut rng, &mut history)?;
//!
//! assert_eq!(result.weights.shape(), &[4, 3, 2]);
//! assert_eq!(history.errors.len(), result.iters);
//! let predictions = result.predict(&x)?;
//! assert_eq!(predictions.shape(), &[30, 2]);
//! # Ok::<(), tenreg_fit::FitError>(())
//! ```
//!
//! ## Logging
//!
//! [`fit`] reports each sweep through `tracing` at debug level inside a
//! `low_rank_fit` span, logs convergence at info and the iteration cap at
//! warn. Install any subscriber to see them.
//!
//! ## SciRS2 Integration
//!
//! Arrays come from `scirs2_core::ndarray_ext`, the Gram inverse from
//! `scirs2_linalg`, and random initialization from `scirs2_core::random`.

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod factors;
pub mod fit;
pub mod monitor;
pub mod normalize;
pub mod operators;
pub mod reconstruct;
pub mod scalar;


// Re-exports
pub use config::*;
pub use error::*;
pub use factors::{FactorSet, FactorUpdateEngine};
pub use fit::*;
pub use monitor::*;
pub use normalize::stabilize;
pub use operators::RegularizedOperators;
pub use reconstruct::{contract_samples, reconstruct_weights};
pub use scalar::FitScalar;
