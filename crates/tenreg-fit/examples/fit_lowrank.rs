//! Low-rank tensor regression example.
//!
//! Fits a rank-2 weight tensor mapping (4, 5) inputs to 3-vectors, then
//! compares it with the planted weights.
//!
//! Run with:
//! ```bash
//! RUST_LOG=tenreg_fit=debug cargo run --example fit_lowrank
//! ```

use scirs2_core::ndarray_ext::Array1;
use scirs2_core::random::{SeedableRng, StdRng};
use tenreg_core::DenseND;
use tenreg_fit::{
    contract_samples, fit_with, reconstruct_weights, ErrorHistory, FactorSet, FitConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== tenreg-fit: low-rank regression ===\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let x = DenseND::<f64>::random_normal(&[200, 4, 5], 0.0, 1.0, &mut rng);

    // Planted rank-2 weights
    let planted = FactorSet::from_pairs(vec![
        (
            Array1::from_iter((0..20).map(|k| (k as f64 * 0.3).sin())),
            Array1::from(vec![1.0, -0.5, 2.0]),
        ),
        (
            Array1::from_iter((0..20).map(|k| if k % 4 == 0 { 1.0 } else { 0.0 })),
            Array1::from(vec![0.0, 1.5, -1.0]),
        ),
    ])?;
    let w_true = reconstruct_weights(&planted, &[4, 5], &[3])?;
    let y = contract_samples(&x, &w_true)?;
    println!("X: {:?}  Y: {:?}", x.shape(), y.shape());

    let config = FitConfig::new(2).with_lambda(1e-3).with_eps(1e-10);
    let mut history = ErrorHistory::new();
    let result = fit_with(&x, &y, &config, &mut rng, &mut history)?;

    println!("Status: {:?} after {} sweeps", result.status, result.iters);
    println!("Final regularized error: {:.3e}", result.error);
    for (step, err) in history.errors.iter().enumerate().take(5) {
        println!("  sweep {:>3}: {:.6e}", step + 1, err);
    }
    if let Some(warning) = result.warning() {
        println!("Warning: {}", warning);
    }

    let max_diff = result
        .weights
        .iter()
        .zip(w_true.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f64, f64::max);
    println!("Max |W - W_true|: {:.3e}", max_diff);

    Ok(())
}
