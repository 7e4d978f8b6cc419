//! Property-based tests for matricization
//!
//! Uses proptest to check that sample-axis unfolding is an exact,
//! order-preserving bijection for arbitrary shapes and contents.

#[cfg(test)]
mod tests {
    use crate::DenseND;
    use proptest::prelude::*;

    // (N, d_1..d_k) with 0..=3 trailing axes
    fn batch_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<f64>)> {
        (1usize..6, prop::collection::vec(1usize..5, 0..=3)).prop_flat_map(|(n, trailing)| {
            let mut shape = vec![n];
            shape.extend(trailing);
            let len: usize = shape.iter().product();
            (
                Just(shape),
                prop::collection::vec(-1.0e6f64..1.0e6, len..=len),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_fold_unfold_roundtrip((shape, data) in batch_strategy()) {
            let tensor = DenseND::from_vec(data, &shape).unwrap();
            let mat = tensor.unfold_samples().unwrap();
            let back = DenseND::fold_samples(&mat, &shape[1..]).unwrap();

            // Bit-for-bit equality
            let lhs: Vec<u64> = tensor.iter().map(|v| v.to_bits()).collect();
            let rhs: Vec<u64> = back.iter().map(|v| v.to_bits()).collect();
            prop_assert_eq!(back.shape(), tensor.shape());
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn prop_unfold_shape((shape, data) in batch_strategy()) {
            let tensor = DenseND::from_vec(data, &shape).unwrap();
            let mat = tensor.unfold_samples().unwrap();
            let features: usize = shape[1..].iter().product();
            prop_assert_eq!(mat.dim(), (shape[0], features));
        }

        #[test]
        fn prop_rows_are_samples((shape, data) in batch_strategy()) {
            let tensor = DenseND::from_vec(data.clone(), &shape).unwrap();
            let mat = tensor.unfold_samples().unwrap();
            let features: usize = shape[1..].iter().product();
            for n in 0..shape[0] {
                let row: Vec<f64> = mat.row(n).to_vec();
                prop_assert_eq!(row.as_slice(), &data[n * features..(n + 1) * features]);
            }
        }

        #[test]
        fn prop_reshape_roundtrip((shape, data) in batch_strategy()) {
            let tensor = DenseND::from_vec(data, &shape).unwrap();
            let flat = tensor.reshape(&[tensor.len()]).unwrap();
            let restored = flat.reshape(&shape).unwrap();
            prop_assert_eq!(restored, tensor);
        }
    }
}
