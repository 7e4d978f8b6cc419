//! Fit configuration
//!
//! Defaults: `lambda_reg = 0.1`, `eps = 1e-6`, at most 1000 sweeps.

use crate::error::FitError;

/// Default ridge strength
pub const DEFAULT_LAMBDA: f64 = 0.1;

/// Default convergence threshold on the change in regularized MSE
pub const DEFAULT_EPS: f64 = 1e-6;

/// Default sweep cap
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default threshold below which a divisor counts as zero
pub const DEFAULT_DEGENERACY_TOL: f64 = 1e-12;

/// Initialization strategy for the factor vectors
///
/// Both strategies are mean-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitStrategy {
    /// Standard normal entries N(0, 1)
    #[default]
    RandomNormal,
    /// Uniform entries on [-1, 1)
    RandomUniform,
}

/// Hyperparameters for [`fit`](crate::fit)
///
/// # Examples
///
/// ```
/// use tenreg_fit::{FitConfig, InitStrategy};
///
/// let config = FitConfig::new(5)
///     .with_lambda(1.0)
///     .with_eps(1e-8)
///     .with_seed(42)
///     .with_init(InitStrategy::RandomUniform);
/// assert!(config.validate().is_ok());
/// assert!(FitConfig::new(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitConfig {
    /// CP-rank R of the weight matrix (number of outer-product terms)
    pub rank: usize,

    /// Ridge parameter λ ≥ 0, used both in the Gram matrix and in the
    /// monitored error
    pub lambda_reg: f64,

    /// Stop once successive errors differ by less than this
    pub eps: f64,

    /// Maximum number of sweeps
    pub max_iter: usize,

    pub init: InitStrategy,

    /// Seed for the factor initialization; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Keep the final (normalized) factor pairs on the result
    pub keep_factors: bool,

    /// Divisors with magnitude at or below this raise `DegenerateFactor`
    pub degeneracy_tol: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            rank: 1,
            lambda_reg: DEFAULT_LAMBDA,
            eps: DEFAULT_EPS,
            max_iter: DEFAULT_MAX_ITER,
            init: InitStrategy::default(),
            seed: None,
            keep_factors: false,
            degeneracy_tol: DEFAULT_DEGENERACY_TOL,
        }
    }
}

impl FitConfig {
    /// Default configuration for the given rank
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            ..Default::default()
        }
    }

    pub fn with_lambda(mut self, lambda_reg: f64) -> Self {
        self.lambda_reg = lambda_reg;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Opt into returning the factor pairs alongside the weight tensor
    pub fn with_factors(mut self) -> Self {
        self.keep_factors = true;
        self
    }

    pub fn with_degeneracy_tol(mut self, tol: f64) -> Self {
        self.degeneracy_tol = tol;
        self
    }

    /// Check the preconditions on every hyperparameter
    pub fn validate(&self) -> Result<(), FitError> {
        if self.rank == 0 {
            return Err(FitError::InvalidRank(self.rank));
        }
        if !self.lambda_reg.is_finite() || self.lambda_reg < 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "lambda_reg must be finite and non-negative, got {}",
                self.lambda_reg
            )));
        }
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "eps must be finite and positive, got {}",
                self.eps
            )));
        }
        if self.max_iter == 0 {
            return Err(FitError::InvalidConfig(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if !self.degeneracy_tol.is_finite() || self.degeneracy_tol < 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "degeneracy_tol must be finite and non-negative, got {}",
                self.degeneracy_tol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::new(3);
        assert_eq!(config.rank, 3);
        assert_eq!(config.lambda_reg, 0.1);
        assert_eq!(config.eps, 1e-6);
        assert_eq!(config.max_iter, 1000);
        assert_eq!(config.init, InitStrategy::RandomNormal);
        assert!(config.seed.is_none());
        assert!(!config.keep_factors);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            FitConfig::new(0).validate(),
            Err(FitError::InvalidRank(0))
        ));
        assert!(FitConfig::new(1).with_lambda(-0.5).validate().is_err());
        assert!(FitConfig::new(1).with_lambda(f64::NAN).validate().is_err());
        assert!(FitConfig::new(1).with_eps(0.0).validate().is_err());
        assert!(FitConfig::new(1).with_max_iter(0).validate().is_err());
        assert!(FitConfig::new(1).with_degeneracy_tol(-1.0).validate().is_err());
    }

    #[test]
    fn test_zero_lambda_is_allowed() {
        assert!(FitConfig::new(2).with_lambda(0.0).validate().is_ok());
    }
}
