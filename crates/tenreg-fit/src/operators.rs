//! Regularized Gram operators
//!
//! Built once per fit from the matricized batches and shared read-only by
//! every coordinate update:
//!
//! ```text
//! G   = XᵀX + λI        (I × I)
//! G⁻¹                   (I × I)
//! C   = XᵀY             (I × J)
//! Cᵀ                    (J × I)
//! ```

use scirs2_core::ndarray_ext::Array2;
use scirs2_linalg::inv;

use crate::error::FitError;
use crate::scalar::{to_f64, FitScalar};

/// Cached operators for one fit call
#[derive(Debug, Clone)]
pub struct RegularizedOperators<T> {
    gram: Array2<T>,
    gram_inv: Array2<T>,
    cross: Array2<T>,
    cross_t: Array2<T>,
    lambda: T,
}

impl<T: FitScalar> RegularizedOperators<T> {
    /// Build the operators from `X_mat` (N × I) and `Y_mat` (N × J)
    ///
    /// # Errors
    ///
    /// - [`FitError::ShapeMismatch`] if the sample counts differ
    /// - [`FitError::InvalidConfig`] if `lambda` is negative or not finite
    /// - [`FitError::SingularMatrix`] if `G` is numerically singular: the
    ///   inversion fails or `G · G⁻¹` is not the identity to working
    ///   precision. With `lambda = 0` this is the column-rank-deficient case.
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::array;
    /// use tenreg_fit::RegularizedOperators;
    ///
    /// let x = array![[1.0, 0.0], [0.0, 2.0], [1.0, 1.0]];
    /// let y = array![[1.0], [2.0], [3.0]];
    /// let ops = RegularizedOperators::new(&x, &y, 0.5).unwrap();
    /// assert_eq!(ops.gram()[[0, 0]], 2.5);
    /// assert_eq!(ops.cross()[[1, 0]], 7.0);
    /// ```
    pub fn new(x_mat: &Array2<T>, y_mat: &Array2<T>, lambda: T) -> Result<Self, FitError> {
        if x_mat.nrows() != y_mat.nrows() {
            return Err(FitError::ShapeMismatch {
                x_samples: x_mat.nrows(),
                y_samples: y_mat.nrows(),
            });
        }
        if !lambda.is_finite() || lambda < T::zero() {
            return Err(FitError::InvalidConfig(format!(
                "lambda_reg must be finite and non-negative, got {}",
                lambda
            )));
        }

        let mut gram = x_mat.t().dot(x_mat);
        for i in 0..gram.nrows() {
            gram[[i, i]] += lambda;
        }

        let gram_inv = inv(&gram.view(), None)
            .map_err(|e| FitError::SingularMatrix(e.to_string()))?;
        check_inverse(&gram, &gram_inv)?;

        let cross = x_mat.t().dot(y_mat);
        let cross_t = cross.t().to_owned();

        Ok(Self {
            gram,
            gram_inv,
            cross,
            cross_t,
            lambda,
        })
    }

    /// `XᵀX + λI`
    pub fn gram(&self) -> &Array2<T> {
        &self.gram
    }

    /// `(XᵀX + λI)⁻¹`
    pub fn gram_inv(&self) -> &Array2<T> {
        &self.gram_inv
    }

    /// `XᵀY`
    pub fn cross(&self) -> &Array2<T> {
        &self.cross
    }

    /// `YᵀX`
    pub fn cross_t(&self) -> &Array2<T> {
        &self.cross_t
    }

    /// Ridge parameter the Gram matrix was built with
    pub fn lambda(&self) -> T {
        self.lambda
    }

    /// Input feature count I
    pub fn input_dim(&self) -> usize {
        self.gram.nrows()
    }

    /// Output feature count J
    pub fn output_dim(&self) -> usize {
        self.cross.ncols()
    }
}

/// Reject an inverse unless `G · G⁻¹` is the identity to within `√ε · n`
///
/// A rank-deficient `G` maps everything into a proper subspace, so the
/// residual against `I` stays large whatever entries the inversion produced.
fn check_inverse<T: FitScalar>(gram: &Array2<T>, gram_inv: &Array2<T>) -> Result<(), FitError> {
    if gram_inv.iter().any(|v| !v.is_finite()) {
        return Err(FitError::SingularMatrix(
            "inverse contains non-finite entries".to_string(),
        ));
    }

    let n = gram.nrows();
    let tol = T::epsilon().sqrt() * T::from(n.max(1)).unwrap_or_else(T::one);
    let product = gram.dot(gram_inv);
    let residual = product
        .indexed_iter()
        .map(|((i, j), &v)| if i == j { (v - T::one()).abs() } else { v.abs() })
        .fold(T::zero(), |acc, r| if r > acc || r.is_nan() { r } else { acc });

    if residual.is_nan() || residual > tol {
        return Err(FitError::SingularMatrix(format!(
            "|G·G⁻¹ − I| = {:e} exceeds tolerance {:e}",
            to_f64(residual),
            to_f64(tol)
        )));
    }
    Ok(())
}
