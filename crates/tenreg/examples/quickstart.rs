//! End-to-end usage of the meta crate.
//!
//! Run with:
//! ```bash
//! TENREG_LOG_FORMAT=compact RUST_LOG=tenreg_fit=debug cargo run --example quickstart
//! ```

use tenreg::prelude::*;

fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default())?;

    // 11 samples of shape (5, 7) mapped to 3 outputs
    let x = DenseND::<f64>::from_fn(&[11, 5, 7], |idx| {
        let (n, i, j) = (idx[0] as f64, idx[1] as f64, idx[2] as f64);
        ((n + 1.0) * 0.37 + i * 1.3 - j * 0.71).sin()
    });
    let y = DenseND::<f64>::from_fn(&[11, 3], |idx| {
        let n = idx[0];
        (0..5).map(|i| x[&[n, i, (i + idx[1]) % 7]]).sum()
    });

    let config = FitConfig::new(5).with_lambda(1.0).with_seed(0);
    let result = fit(&x, &y, &config)?;

    println!("Status: {:?}", result.status);
    println!("Sweeps: {}", result.iters);
    println!("Error:  {:.6e}", result.error);
    println!("W shape: {:?}", result.weights.shape());
    if let Some(warning) = result.warning() {
        println!("Warning: {}", warning);
    }

    Ok(())
}
