//! Low-rank tensor regression via alternating least squares
//!
//! Given N paired samples `X: (N, I_1..I_M)` and `Y: (N, J_1..J_K)`, finds a
//! weight tensor `W: (I_1..I_M, J_1..J_K)` of CP-rank R such that contracting
//! `W` with each input sample approximates the matching output sample, with
//! ridge penalty λ. `W` is only materialized for monitoring and at the end;
//! the optimization runs on its R factor pairs.
//!
//! Control flow:
//!
//! ```text
//! unfold X, Y → operators (once) → { sweep → stabilize → monitor }* → fold W
//! ```

use scirs2_core::numeric::Num;
use scirs2_core::random::{thread_rng, Rng, SeedableRng, StdRng};
use tenreg_core::DenseND;

use crate::config::FitConfig;
use crate::error::FitError;
use crate::factors::{FactorSet, FactorUpdateEngine};
use crate::monitor::{
    regularized_mse, ConvergenceMonitor, MonitorDecision, ProgressObserver, TracingObserver,
};
use crate::operators::RegularizedOperators;
use crate::reconstruct::{contract_samples, reconstruct_weights};
use crate::scalar::{cast, to_f64, FitScalar};

/// How the iteration loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStatus {
    /// Successive errors differed by less than `eps`
    Converged,
    /// `max_iter` sweeps ran without meeting `eps`
    MaxItersReached,
}

/// Non-fatal signal that the iteration cap was hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonConvergenceWarning {
    pub iters: usize,
    /// Last `|previous − current|` error change, if two sweeps ran
    pub last_delta: Option<f64>,
}

impl std::fmt::Display for NonConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.last_delta {
            Some(delta) => write!(
                f,
                "no convergence after {} iterations (last change {:e})",
                self.iters, delta
            ),
            None => write!(f, "no convergence after {} iterations", self.iters),
        }
    }
}

/// Result of a low-rank fit
#[derive(Debug, Clone)]
pub struct LowRankFit<T: Clone + Num> {
    /// Weight tensor of shape `X.shape[1..] ++ Y.shape[1..]`
    pub weights: DenseND<T>,

    /// Regularized training MSE after the final sweep
    pub error: T,

    /// Number of sweeps performed
    pub iters: usize,

    pub status: FitStatus,

    /// Normalized factor pairs after the final sweep, present only when
    /// [`FitConfig::keep_factors`] is set
    pub factors: Option<FactorSet<T>>,

    last_delta: Option<T>,
}

impl<T: FitScalar> LowRankFit<T> {
    pub fn converged(&self) -> bool {
        self.status == FitStatus::Converged
    }

    /// `Some` when the fit stopped at the iteration cap
    pub fn warning(&self) -> Option<NonConvergenceWarning> {
        match self.status {
            FitStatus::Converged => None,
            FitStatus::MaxItersReached => Some(NonConvergenceWarning {
                iters: self.iters,
                last_delta: self.last_delta.map(to_f64),
            }),
        }
    }

    /// Predict outputs `(N, J_1..J_K)` for a batch of inputs
    pub fn predict(&self, x: &DenseND<T>) -> Result<DenseND<T>, FitError> {
        contract_samples(x, &self.weights)
    }
}

/// Fit a rank-`config.rank` weight tensor mapping `x` samples to `y` samples
///
/// Initialization uses `config.seed` when set (otherwise entropy) and
/// progress goes to `tracing` at debug level. Use [`fit_with`] to inject the
/// generator and the progress observer.
///
/// # Errors
///
/// - [`FitError::ShapeMismatch`] if `x` and `y` differ in sample count
/// - [`FitError::InvalidRank`] / [`FitError::InvalidConfig`] for bad hyperparameters
/// - [`FitError::SingularMatrix`] if `XᵀX + λI` is not invertible
/// - [`FitError::DegenerateFactor`] if an update or rescale would divide by ~0
///
/// Reaching `max_iter` is not an error; see [`LowRankFit::warning`].
///
/// # Examples
///
/// ```
/// use tenreg_core::DenseND;
/// use tenreg_fit::{fit, FitConfig};
///
/// let x = DenseND::<f64>::from_fn(&[20, 3, 2], |idx| ((idx[0] * 7 + idx[1] * 3 + idx[2]) % 5) as f64);
/// let y = DenseND::<f64>::from_fn(&[20, 4], |idx| ((idx[0] + idx[1]) % 3) as f64);
///
/// let result = fit(&x, &y, &FitConfig::new(2).with_seed(1))?;
/// assert_eq!(result.weights.shape(), &[3, 2, 4]);
/// # Ok::<(), tenreg_fit::FitError>(())
/// ```
pub fn fit<T: FitScalar>(
    x: &DenseND<T>,
    y: &DenseND<T>,
    config: &FitConfig,
) -> Result<LowRankFit<T>, FitError> {
    let mut rng = if let Some(seed) = config.seed {
        StdRng::seed_from_u64(seed)
    } else {
        let mut thread_rng_instance = thread_rng();
        StdRng::from_rng(&mut thread_rng_instance)
    };
    fit_with(x, y, config, &mut rng, &mut TracingObserver)
}

/// [`fit`] with an injected random generator and progress observer
pub fn fit_with<T, R, O>(
    x: &DenseND<T>,
    y: &DenseND<T>,
    config: &FitConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<LowRankFit<T>, FitError>
where
    T: FitScalar,
    R: Rng,
    O: ProgressObserver<T> + ?Sized,
{
    config.validate()?;

    let x_samples = x.sample_count()?;
    let y_samples = y.sample_count()?;
    if x_samples != y_samples {
        return Err(FitError::ShapeMismatch {
            x_samples,
            y_samples,
        });
    }

    let span = tracing::info_span!(
        "low_rank_fit",
        rank = config.rank,
        lambda = config.lambda_reg,
        samples = x_samples
    );
    let _enter = span.enter();

    let lambda: T = cast(config.lambda_reg, "lambda_reg")?;
    let eps: T = cast(config.eps, "eps")?;
    let tol: T = cast(config.degeneracy_tol, "degeneracy_tol")?;

    let x_mat = x.unfold_samples()?;
    let y_mat = y.unfold_samples()?;
    let ops = RegularizedOperators::new(&x_mat, &y_mat, lambda)?;
    tracing::debug!(
        input_dim = ops.input_dim(),
        output_dim = ops.output_dim(),
        "regularized operators ready"
    );

    let factors = FactorSet::random(
        config.rank,
        ops.input_dim(),
        ops.output_dim(),
        config.init,
        rng,
    )?;
    let mut engine = FactorUpdateEngine::new(&ops, factors, tol)?;
    let mut monitor = ConvergenceMonitor::new(eps, config.max_iter);

    let status = loop {
        engine.sweep()?;
        engine.normalize()?;

        let w_mat = engine.factors().weight_matrix();
        let error = regularized_mse(&x_mat, &y_mat, &w_mat, ops.lambda());

        match monitor.record(error, observer) {
            MonitorDecision::Continue => {}
            MonitorDecision::Converged => {
                tracing::info!(iters = monitor.steps(), error = %error, "converged");
                break FitStatus::Converged;
            }
            MonitorDecision::MaxItersReached => {
                tracing::warn!(
                    iters = monitor.steps(),
                    error = %error,
                    delta = ?monitor.delta().map(to_f64),
                    "iteration cap reached without convergence"
                );
                break FitStatus::MaxItersReached;
            }
        }
    };

    let factors = engine.into_factors();
    let weights = reconstruct_weights(&factors, x.trailing_shape()?, y.trailing_shape()?)?;

    Ok(LowRankFit {
        weights,
        error: monitor.error().unwrap_or_else(T::nan),
        iters: monitor.steps(),
        status,
        factors: config.keep_factors.then_some(factors),
        last_delta: monitor.delta(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{ErrorHistory, NoopObserver};
    use scirs2_core::ndarray_ext::Array1;

    fn rank1_problem(n: usize) -> (DenseND<f64>, DenseND<f64>) {
        let mut rng = StdRng::seed_from_u64(11);
        let x = DenseND::<f64>::random_normal(&[n, 2, 3], 0.0, 1.0, &mut rng);
        let u = Array1::from(vec![1.0, -0.5, 0.25, 2.0, 0.0, -1.0]);
        let v = Array1::from(vec![0.5, 1.5, -1.0, 0.75]);
        let w_true = FactorSet::from_pairs(vec![(u, v)]).unwrap().weight_matrix();
        let y_mat = x.unfold_samples().unwrap().dot(&w_true);
        let y = DenseND::fold_samples(&y_mat, &[2, 2]).unwrap();
        (x, y)
    }

    #[test]
    fn test_rank1_exact_recovery() {
        let (x, y) = rank1_problem(40);
        let config = FitConfig::new(1)
            .with_lambda(1e-10)
            .with_eps(1e-14)
            .with_max_iter(500);
        let result = fit_with(
            &x,
            &y,
            &config,
            &mut StdRng::seed_from_u64(3),
            &mut NoopObserver,
        )
        .unwrap();

        assert!(result.converged());
        assert!(result.error < 1e-8, "error = {}", result.error);
        assert_eq!(result.weights.shape(), &[2, 3, 2, 2]);
    }

    #[test]
    fn test_sample_mismatch_is_error() {
        let x = DenseND::<f64>::zeros(&[5, 2]);
        let y = DenseND::<f64>::zeros(&[4, 2]);
        let err = fit(&x, &y, &FitConfig::new(1).with_seed(0)).unwrap_err();
        assert!(matches!(
            err,
            FitError::ShapeMismatch {
                x_samples: 5,
                y_samples: 4
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_work() {
        let (x, y) = rank1_problem(5);
        assert!(matches!(
            fit(&x, &y, &FitConfig::new(0)),
            Err(FitError::InvalidRank(0))
        ));
        assert!(matches!(
            fit(&x, &y, &FitConfig::new(1).with_lambda(-1.0)),
            Err(FitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_iteration_cap_warning() {
        let (x, y) = rank1_problem(10);
        let config = FitConfig::new(2).with_eps(1e-300).with_max_iter(3);
        let mut history = ErrorHistory::new();
        let result = fit_with(&x, &y, &config, &mut StdRng::seed_from_u64(9), &mut history)
            .unwrap();

        assert_eq!(result.status, FitStatus::MaxItersReached);
        assert_eq!(result.iters, 3);
        assert_eq!(history.errors.len(), 3);
        let warning = result.warning().unwrap();
        assert_eq!(warning.iters, 3);
        assert!(warning.last_delta.is_some());
        assert_eq!(result.error, history.errors[2]);
    }

    #[test]
    fn test_seeded_fits_are_reproducible() {
        let (x, y) = rank1_problem(12);
        let config = FitConfig::new(2).with_seed(77).with_max_iter(20);
        let a = fit(&x, &y, &config).unwrap();
        let b = fit(&x, &y, &config).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.iters, b.iters);
    }

    #[test]
    fn test_keep_factors_reproduces_weights() {
        let (x, y) = rank1_problem(12);
        let config = FitConfig::new(2).with_seed(5).with_max_iter(50).with_factors();
        let result = fit(&x, &y, &config).unwrap();
        let factors = result.factors.as_ref().unwrap();
        assert_eq!(factors.rank(), 2);
        let rebuilt = reconstruct_weights(factors, &[2, 3], &[2, 2]).unwrap();
        assert_eq!(rebuilt, result.weights);

        let without = fit(&x, &y, &FitConfig::new(2).with_seed(5).with_max_iter(50)).unwrap();
        assert!(without.factors.is_none());
    }
}
