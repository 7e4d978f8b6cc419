//! Convergence monitoring and progress observers
//!
//! After each sweep the monitor evaluates the regularized training error
//!
//! ```text
//! error = mean((Y − X W)²) + λ · mean(W²)
//! ```
//!
//! and stops once two successive values differ by less than `eps`. The same
//! λ as the fit is used so the monitored quantity is the one being optimized.

use scirs2_core::ndarray_ext::Array2;

use crate::scalar::FitScalar;

/// Regularized mean-squared error of a weight matrix on matricized data
///
/// `x_mat` is N × I, `y_mat` is N × J and `w_mat` is I × J. Empty matrices
/// contribute zero to their mean.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenreg_fit::regularized_mse;
///
/// let x = array![[1.0, 0.0], [0.0, 1.0]];
/// let w = array![[2.0], [0.0]];
/// let y = array![[2.0], [1.0]];
/// // residual [0, 1] → mse 0.5; mean(W²) = 2
/// let err: f64 = regularized_mse(&x, &y, &w, 0.25);
/// assert!((err - 1.0).abs() < 1e-12);
/// ```
pub fn regularized_mse<T: FitScalar>(
    x_mat: &Array2<T>,
    y_mat: &Array2<T>,
    w_mat: &Array2<T>,
    lambda: T,
) -> T {
    let residual = y_mat - &x_mat.dot(w_mat);
    let mse = residual.mapv(|r| r * r).mean().unwrap_or_else(T::zero);
    let penalty = w_mat.mapv(|w| w * w).mean().unwrap_or_else(T::zero);
    mse + lambda * penalty
}

/// Receives `(step, error)` after every sweep
///
/// Steps are 1-based sweep counts. Observers never influence the fit.
pub trait ProgressObserver<T> {
    fn on_iteration(&mut self, step: usize, error: T);
}

impl<T, F> ProgressObserver<T> for F
where
    F: FnMut(usize, T),
{
    fn on_iteration(&mut self, step: usize, error: T) {
        self(step, error)
    }
}

/// Discards progress reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T> ProgressObserver<T> for NoopObserver {
    fn on_iteration(&mut self, _step: usize, _error: T) {}
}

/// Emits each report as a `tracing` debug event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<T: FitScalar> ProgressObserver<T> for TracingObserver {
    fn on_iteration(&mut self, step: usize, error: T) {
        tracing::debug!(step, error = %error, "sweep complete");
    }
}

/// Records the full error sequence
#[derive(Debug, Clone, Default)]
pub struct ErrorHistory<T> {
    pub errors: Vec<T>,
}

impl<T> ErrorHistory<T> {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<T: Copy> ProgressObserver<T> for ErrorHistory<T> {
    fn on_iteration(&mut self, _step: usize, error: T) {
        self.errors.push(error);
    }
}

/// What the loop should do after a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorDecision {
    Continue,
    Converged,
    MaxItersReached,
}

/// Tracks successive errors and decides termination
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor<T> {
    eps: T,
    max_iter: usize,
    step: usize,
    previous: Option<T>,
    current: Option<T>,
}

impl<T: FitScalar> ConvergenceMonitor<T> {
    pub fn new(eps: T, max_iter: usize) -> Self {
        Self {
            eps,
            max_iter,
            step: 0,
            previous: None,
            current: None,
        }
    }

    /// Record the error of the sweep just finished
    ///
    /// Reports `(step, error)` to `observer`, then returns `Converged` when a
    /// previous error exists and `|previous − error| < eps`, otherwise
    /// `MaxItersReached` once `max_iter` sweeps have been recorded.
    pub fn record<O: ProgressObserver<T> + ?Sized>(
        &mut self,
        error: T,
        observer: &mut O,
    ) -> MonitorDecision {
        self.step += 1;
        self.previous = self.current.replace(error);
        observer.on_iteration(self.step, error);

        if matches!(self.delta(), Some(delta) if delta < self.eps) {
            MonitorDecision::Converged
        } else if self.step >= self.max_iter {
            MonitorDecision::MaxItersReached
        } else {
            MonitorDecision::Continue
        }
    }

    /// Sweeps recorded so far
    pub fn steps(&self) -> usize {
        self.step
    }

    /// Latest error, if any sweep has been recorded
    pub fn error(&self) -> Option<T> {
        self.current
    }

    /// `|previous − current|`, once two sweeps have been recorded
    pub fn delta(&self) -> Option<T> {
        match (self.previous, self.current) {
            (Some(prev), Some(cur)) => Some((prev - cur).abs()),
            _ => None,
        }
    }
}
