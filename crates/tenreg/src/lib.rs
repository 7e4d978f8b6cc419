//! # tenreg - Low-Rank Tensor Regression
//!
//! Fits a linear map between tensor-valued samples whose weight tensor is
//! constrained to CP-rank R, using ridge-regularized alternating least
//! squares.
//!
//! This is the **meta crate** that re-exports the components and provides
//! logging setup.
//!
//! ## Quick Start
//!
//! ```
//! use tenreg::prelude::*;
//!
//! let x = DenseND::<f64>::from_fn(&[30, 3, 4], |idx| ((idx[0] + 2 * idx[1] + idx[2]) % 7) as f64);
//! let y = DenseND::<f64>::from_fn(&[30, 2], |idx| ((idx[0] * (idx[1] + 1)) % 5) as f64);
//!
//! let result = fit(&x, &y, &FitConfig::new(2).with_lambda(0.5).with_seed(7))?;
//! assert_eq!(result.weights.shape(), &[3, 4, 2]);
//! assert_eq!(result.predict(&x)?.shape(), &[30, 2]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Dense Tensors ([`core`])
//!
//! `DenseND`, random creation, sample-axis unfold/fold.
//!
//! ```
//! use tenreg::core::DenseND;
//!
//! let batch = DenseND::<f64>::ones(&[10, 2, 3]);
//! let mat = batch.unfold_samples().unwrap();
//! assert_eq!(mat.shape(), &[10, 6]);
//! ```
//!
//! ### Fitting ([`fit`](crate::fit))
//!
//! Operators, factor sweeps, stabilization, convergence monitoring and weight
//! reconstruction.
//!
//! ### Logging ([`logging`])
//!
//! `tracing-subscriber` initialization driven by `RUST_LOG` and
//! `TENREG_LOG_FORMAT`.
//!
//! ## Features
//!
//! - `serde`: serialize `FitConfig` and `InitStrategy`

#![deny(warnings)]

pub use tenreg_core as core;
pub use tenreg_fit as fit;

pub mod logging;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```
    //! use tenreg::prelude::*;
    //!
    //! let config = FitConfig::new(3);
    //! assert_eq!(config.rank, 3);
    //! ```

    pub use crate::core::{DenseND, ShapeError};

    pub use crate::fit::{
        contract_samples, fit, fit_with, reconstruct_weights, ErrorHistory, FitConfig, FitError,
        FitStatus, InitStrategy, LowRankFit, NoopObserver, ProgressObserver,
    };

    pub use crate::logging::{init_tracing, TracingConfig, TracingFormat};
}
