//! Weight tensor assembly and sample contraction

use scirs2_core::ndarray_ext::Array2;
use tenreg_core::DenseND;

use crate::error::FitError;
use crate::factors::FactorSet;
use crate::scalar::FitScalar;

/// Assemble `W = Σᵣ u_r v_rᵀ` and fold it to shape `input_shape ++ output_shape`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array1;
/// use tenreg_fit::{reconstruct_weights, FactorSet};
///
/// let u = Array1::from(vec![1.0; 6]);
/// let v = Array1::from(vec![0.5; 4]);
/// let factors = FactorSet::from_pairs(vec![(u, v)]).unwrap();
/// let w = reconstruct_weights(&factors, &[2, 3], &[4]).unwrap();
/// assert_eq!(w.shape(), &[2, 3, 4]);
/// ```
pub fn reconstruct_weights<T: FitScalar>(
    factors: &FactorSet<T>,
    input_shape: &[usize],
    output_shape: &[usize],
) -> Result<DenseND<T>, FitError> {
    let mut shape = input_shape.to_vec();
    shape.extend_from_slice(output_shape);
    Ok(DenseND::from_matrix(&factors.weight_matrix(), &shape)?)
}

/// Contract a batch `(N, I_1..I_M)` with weights `(I_1..I_M, J_1..J_K)`
///
/// Returns the predictions `(N, J_1..J_K)`, i.e. `fold(X_mat · W_mat)`.
///
/// # Errors
///
/// [`FitError::WeightShapeMismatch`] if the weight shape does not begin with
/// the sample shape of `x`.
pub fn contract_samples<T: FitScalar>(
    x: &DenseND<T>,
    weights: &DenseND<T>,
) -> Result<DenseND<T>, FitError> {
    let input_shape = x.trailing_shape()?;
    let w_shape = weights.shape();
    if w_shape.len() < input_shape.len() || &w_shape[..input_shape.len()] != input_shape {
        return Err(FitError::WeightShapeMismatch {
            input: input_shape.to_vec(),
            weights: w_shape.to_vec(),
        });
    }
    let output_shape = &w_shape[input_shape.len()..];

    let x_mat = x.unfold_samples()?;
    let w_mat = weight_matrix_of(weights, x_mat.ncols(), output_shape)?;
    let y_mat = x_mat.dot(&w_mat);
    Ok(DenseND::fold_samples(&y_mat, output_shape)?)
}

// (I..., J...) tensor viewed as an I × J matrix
fn weight_matrix_of<T: FitScalar>(
    weights: &DenseND<T>,
    input_dim: usize,
    output_shape: &[usize],
) -> Result<Array2<T>, FitError> {
    let output_dim: usize = output_shape.iter().product();
    Ok(weights.reshape(&[input_dim, output_dim])?.unfold_samples()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_reconstruct_element_order() {
        let factors = FactorSet::from_pairs(vec![(
            array![1.0, 2.0, 3.0, 4.0],
            array![10.0, 100.0],
        )])
        .unwrap();
        let w = reconstruct_weights(&factors, &[2, 2], &[2]).unwrap();
        // u index (i1, i2) = i1 * 2 + i2
        assert_eq!(w[&[1, 0, 1]], 300.0);
        assert_eq!(w[&[0, 1, 0]], 20.0);
    }

    #[test]
    fn test_contract_matches_matrix_product() {
        let x = DenseND::from_fn(&[3, 2, 2], |idx| (idx[0] + 2 * idx[1] + idx[2]) as f64);
        let w = DenseND::from_fn(&[2, 2, 3], |idx| (idx[0] as f64) - (idx[1] * idx[2]) as f64);
        let y = contract_samples(&x, &w).unwrap();
        assert_eq!(y.shape(), &[3, 3]);

        for n in 0..3 {
            for j in 0..3 {
                let mut expected = 0.0;
                for a in 0..2 {
                    for b in 0..2 {
                        expected += x[&[n, a, b]] * w[&[a, b, j]];
                    }
                }
                assert!((y[&[n, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_contract_scalar_output() {
        // W with no output axes yields (N,) predictions
        let x = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let w = DenseND::from_vec(vec![1.0, -1.0], &[2]).unwrap();
        let y = contract_samples(&x, &w).unwrap();
        assert_eq!(y.shape(), &[2]);
        assert_eq!(y.to_vec(), vec![-1.0, -1.0]);
    }

    #[test]
    fn test_contract_shape_mismatch() {
        let x = DenseND::<f64>::zeros(&[4, 3, 2]);
        let w = DenseND::<f64>::zeros(&[2, 3, 5]);
        assert!(matches!(
            contract_samples(&x, &w),
            Err(FitError::WeightShapeMismatch { .. })
        ));
    }
}
