//! Dense tensor type definition and basic operations
//!
//! This module defines the core `DenseND<T>` type and provides basic creation
//! and accessor methods. Matricization lives in `shape_ops`, random
//! initialization in `creation`.

use crate::error::ShapeError;
use scirs2_core::ndarray_ext::{Array, ArrayView, Dimension, IxDyn};
use scirs2_core::numeric::Num;

/// Dense N-dimensional tensor backed by scirs2_core's ndarray
///
/// Sample batches are stored with the sample index as the leading axis,
/// e.g. an input batch of shape `(N, I_1, ..., I_M)`.
///
/// # Memory Layout
///
/// Tensors are always C-contiguous (row-major). Every constructor produces
/// standard layout, so flattening a tensor is a zero-copy reinterpretation.
///
/// # Examples
///
/// ```
/// use tenreg_core::DenseND;
///
/// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// assert_eq!(tensor.rank(), 3);
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseND<T> {
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Create a tensor from an existing ndarray
    ///
    /// The array is copied into standard layout if it is not already.
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        if array.is_standard_layout() {
            Self { data: array }
        } else {
            Self {
                data: array.as_standard_layout().into_owned(),
            }
        }
    }

    /// Create a tensor from a vector with given shape
    ///
    /// # Arguments
    ///
    /// * `vec` - Flattened data in row-major order
    /// * `shape` - Target shape
    ///
    /// # Examples
    ///
    /// ```
    /// use tenreg_core::DenseND;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let tensor = DenseND::from_vec(data, &[2, 3]).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// assert!(DenseND::from_vec(vec![1.0, 2.0], &[3]).is_err());
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> Result<Self, ShapeError> {
        let expected: usize = shape.iter().product();
        if vec.len() != expected {
            return Err(ShapeError::ElementCount {
                shape: shape.to_vec(),
                expected,
                actual: vec.len(),
            });
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)
            .map_err(|e| ShapeError::Layout(e.to_string()))?;
        Ok(Self { data: array })
    }

    /// Get the rank (number of dimensions) of this tensor
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Get the shape of this tensor
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the tensor is empty (has zero elements)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get an immutable reference to the underlying ndarray
    pub fn as_array(&self) -> &Array<T, IxDyn> {
        &self.data
    }

    /// Get an immutable view of the tensor
    pub fn view(&self) -> ArrayView<'_, T, IxDyn> {
        self.data.view()
    }

    /// Create a tensor of zeros
    ///
    /// ```
    /// use tenreg_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// assert_eq!(tensor[&[0, 0, 0]], 0.0);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// Create a tensor of ones
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// Create a tensor whose element at each multi-index is `f(index)`
    ///
    /// Elements are visited in row-major order.
    ///
    /// ```
    /// use tenreg_core::DenseND;
    ///
    /// let tensor = DenseND::from_fn(&[2, 3], |idx| (idx[0] * 3 + idx[1]) as f64);
    /// assert_eq!(tensor[&[1, 2]], 5.0);
    /// ```
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let data = Array::from_shape_fn(IxDyn(shape), |idx| f(idx.slice()));
        Self { data }
    }

    /// Convert the tensor to a flat vector in row-major order
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Create an iterator over all elements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_rejects_wrong_count() {
        let err = DenseND::from_vec(vec![1.0f64; 5], &[2, 3]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::ElementCount {
                shape: vec![2, 3],
                expected: 6,
                actual: 5,
            }
        );
    }

    #[test]
    fn test_from_fn_row_major() {
        let tensor = DenseND::from_fn(&[2, 2, 2], |idx| (idx[0] * 4 + idx[1] * 2 + idx[2]) as f64);
        assert_eq!(tensor.to_vec(), (0..8).map(|x| x as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_array_non_standard_layout() {
        let arr = Array::from_shape_vec(IxDyn(&[2, 3]), (0..6).map(|x| x as f64).collect())
            .unwrap()
            .reversed_axes();
        let tensor = DenseND::from_array(arr);
        assert_eq!(tensor.shape(), &[3, 2]);
        assert!(tensor.as_array().is_standard_layout());
        assert_eq!(tensor.to_vec(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }
}
