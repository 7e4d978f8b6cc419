//! Shape manipulation and sample-axis matricization
//!
//! The canonical flattening used throughout the workspace: a tensor of shape
//! `(N, d_1, ..., d_k)` becomes an `(N, d_1 * ... * d_k)` matrix whose row `n`
//! holds sample `n` in row-major order over `d_1..d_k` (the last axis varies
//! fastest). Folding is the exact inverse, so
//! `fold_samples(unfold_samples(T), T.shape()[1..]) == T` element for element.

use super::types::DenseND;
use crate::error::ShapeError;
use scirs2_core::ndarray_ext::{Array2, Ix2, IxDyn};
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor to a new shape, keeping row-major element order
    ///
    /// # Examples
    ///
    /// ```
    /// use tenreg_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// assert!(tensor.reshape(&[7]).is_err());
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self, ShapeError> {
        let new_size: usize = new_shape.iter().product();
        if new_size != self.len() {
            return Err(ShapeError::ElementCount {
                shape: new_shape.to_vec(),
                expected: new_size,
                actual: self.len(),
            });
        }
        let reshaped = self
            .data
            .view()
            .into_shape_with_order(IxDyn(new_shape))
            .map_err(|e| ShapeError::Layout(e.to_string()))?;
        Ok(Self {
            data: reshaped.to_owned(),
        })
    }

    /// Number of samples, i.e. the size of the leading axis
    pub fn sample_count(&self) -> Result<usize, ShapeError> {
        self.shape()
            .first()
            .copied()
            .ok_or(ShapeError::MissingSampleAxis)
    }

    /// Shape of a single sample (every axis but the leading one)
    pub fn trailing_shape(&self) -> Result<&[usize], ShapeError> {
        if self.rank() == 0 {
            return Err(ShapeError::MissingSampleAxis);
        }
        Ok(&self.shape()[1..])
    }

    /// Matricize along the sample axis
    ///
    /// Maps a tensor of shape `(N, d_1, ..., d_k)` to an `(N, d_1 * ... * d_k)`
    /// matrix. A rank-1 tensor of shape `(N,)` becomes an `(N, 1)` matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenreg_core::DenseND;
    ///
    /// let tensor = DenseND::from_fn(&[2, 3, 4], |idx| (idx[0] * 100 + idx[1] * 10 + idx[2]) as f64);
    /// let mat = tensor.unfold_samples().unwrap();
    /// assert_eq!(mat.shape(), &[2, 12]);
    /// // Column index j = i1 * 4 + i2
    /// assert_eq!(mat[[1, 2 * 4 + 3]], 123.0);
    /// ```
    pub fn unfold_samples(&self) -> Result<Array2<T>, ShapeError> {
        let n = self.sample_count()?;
        let features: usize = self.trailing_shape()?.iter().product();
        self.data
            .view()
            .into_shape_with_order(IxDyn(&[n, features]))
            .and_then(|v| v.into_dimensionality::<Ix2>())
            .map(|v| v.to_owned())
            .map_err(|e| ShapeError::Layout(e.to_string()))
    }

    /// Fold a sample matrix back into a tensor of shape `(N, trailing...)`
    ///
    /// This is the exact inverse of [`unfold_samples`](Self::unfold_samples).
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::FoldMismatch`] when the matrix column count is
    /// not the product of `trailing`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array2;
    /// use tenreg_core::DenseND;
    ///
    /// let matrix: Array2<f64> = Array2::zeros((5, 6));
    /// let tensor = DenseND::fold_samples(&matrix, &[2, 3]).unwrap();
    /// assert_eq!(tensor.shape(), &[5, 2, 3]);
    /// assert!(DenseND::fold_samples(&matrix, &[4, 2]).is_err());
    /// ```
    pub fn fold_samples(matrix: &Array2<T>, trailing: &[usize]) -> Result<Self, ShapeError> {
        let (rows, cols) = matrix.dim();
        let expected_cols: usize = trailing.iter().product();
        if cols != expected_cols {
            return Err(ShapeError::FoldMismatch {
                matrix: [rows, cols],
                trailing: trailing.to_vec(),
            });
        }

        let mut shape = Vec::with_capacity(trailing.len() + 1);
        shape.push(rows);
        shape.extend_from_slice(trailing);

        let flat: Vec<T> = matrix.iter().cloned().collect();
        Self::from_vec(flat, &shape)
    }

    /// Reinterpret a matrix as a tensor of the given full shape
    ///
    /// Used to turn an `(I, J)` weight matrix into its `(I_1..I_M, J_1..J_K)`
    /// tensor form; the matrix is read in row-major order.
    pub fn from_matrix(matrix: &Array2<T>, shape: &[usize]) -> Result<Self, ShapeError> {
        let flat: Vec<T> = matrix.iter().cloned().collect();
        Self::from_vec(flat, shape)
    }
}
