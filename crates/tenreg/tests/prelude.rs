//! Meta crate smoke tests

use scirs2_core::random::{SeedableRng, StdRng};
use tenreg::prelude::*;

#[test]
fn test_prelude_fit_and_predict() {
    let mut rng = StdRng::seed_from_u64(99);
    let x = DenseND::<f64>::random_uniform(&[40, 2, 3], -1.0, 1.0, &mut rng);
    let y = DenseND::<f64>::random_uniform(&[40, 2, 2], -1.0, 1.0, &mut rng);

    let config = FitConfig::new(2)
        .with_lambda(0.2)
        .with_init(InitStrategy::RandomUniform);
    let mut steps = Vec::new();
    let mut observer = |step: usize, _err: f64| steps.push(step);
    let result = fit_with(&x, &y, &config, &mut rng, &mut observer).unwrap();

    assert_eq!(result.weights.shape(), &[2, 3, 2, 2]);
    assert_eq!(steps.len(), result.iters);
    assert_eq!(steps.first(), Some(&1));

    let pred = result.predict(&x).unwrap();
    assert_eq!(pred.shape(), y.shape());
}

#[test]
fn test_shape_error_converts() {
    let x = DenseND::<f64>::from_vec(vec![], &[0]);
    assert!(x.is_ok());
    let bad = DenseND::<f64>::from_vec(vec![1.0, 2.0], &[3]);
    assert!(matches!(bad, Err(ShapeError::ElementCount { .. })));
}
