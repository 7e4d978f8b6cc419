//! Integration tests for tenreg-core
//!
//! End-to-end checks of the public tensor and matricization API.

use scirs2_core::random::{SeedableRng, StdRng};
use tenreg_core::{DenseND, ShapeError};

#[test]
fn test_unfold_fold_roundtrip_integration() {
    let data = DenseND::<f64>::from_vec((1..=60).map(|x| x as f64).collect(), &[5, 3, 4]).unwrap();

    let unfolded = data.unfold_samples().unwrap();
    assert_eq!(unfolded.shape(), &[5, 12]);

    let folded = DenseND::fold_samples(&unfolded, &[3, 4]).unwrap();
    assert_eq!(folded, data);
}

#[test]
fn test_random_batch_roundtrip() {
    let mut rng = StdRng::seed_from_u64(2024);
    let batch = DenseND::<f64>::random_normal(&[11, 5, 7], 0.0, 1.0, &mut rng);

    let mat = batch.unfold_samples().unwrap();
    assert_eq!(mat.dim(), (11, 35));
    assert_eq!(mat[[10, 34]], batch[&[10, 4, 6]]);

    let back = DenseND::fold_samples(&mat, batch.trailing_shape().unwrap()).unwrap();
    assert_eq!(back, batch);
}

#[test]
fn test_weight_matrix_to_tensor() {
    // (I, J) = (2*3, 4) matrix interpreted as a (2, 3, 4) weight tensor
    let mat = DenseND::<f64>::from_fn(&[6, 4], |idx| (idx[0] * 4 + idx[1]) as f64)
        .unfold_samples()
        .unwrap();
    let w = DenseND::from_matrix(&mat, &[2, 3, 4]).unwrap();
    assert_eq!(w.shape(), &[2, 3, 4]);
    assert_eq!(w[&[1, 2, 3]], 23.0);
}

#[test]
fn test_shape_errors_are_typed() {
    let t = DenseND::<f64>::zeros(&[4, 3]);
    let mat = t.unfold_samples().unwrap();

    match DenseND::fold_samples(&mat, &[2, 2]) {
        Err(ShapeError::FoldMismatch { matrix, trailing }) => {
            assert_eq!(matrix, [4, 3]);
            assert_eq!(trailing, vec![2, 2]);
        }
        other => panic!("expected FoldMismatch, got {:?}", other),
    }

    assert!(matches!(
        t.reshape(&[5, 5]),
        Err(ShapeError::ElementCount { expected: 25, actual: 12, .. })
    ));
}
