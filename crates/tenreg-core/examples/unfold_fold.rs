//! Sample-axis matricization example.
//!
//! Shows how a batch of tensors is flattened into the design matrix used by
//! the low-rank fitter, and how a weight matrix is turned back into a tensor.
//!
//! Run with:
//! ```bash
//! cargo run --example unfold_fold
//! ```

use tenreg_core::DenseND;

fn main() -> anyhow::Result<()> {
    println!("=== tenreg-core: sample-axis unfold/fold ===\n");

    // A batch of 3 samples, each of shape [2, 4]
    let batch = DenseND::<f64>::from_fn(&[3, 2, 4], |idx| {
        (idx[0] * 100 + idx[1] * 10 + idx[2]) as f64
    });
    println!("Batch shape: {:?}", batch.shape());

    let mat = batch.unfold_samples()?;
    println!("Unfolded shape: {:?}", mat.shape());
    println!("Row 1 (sample 1, row-major): {:?}", mat.row(1).to_vec());

    let folded = DenseND::fold_samples(&mat, batch.trailing_shape()?)?;
    println!("Round trip exact: {}", folded == batch);

    // Weight matrix (I, J) = (8, 2) viewed as a [2, 4, 2] tensor
    let w_mat = DenseND::<f64>::from_fn(&[8, 2], |idx| (idx[0] * 2 + idx[1]) as f64).unfold_samples()?;
    let w = DenseND::from_matrix(&w_mat, &[2, 4, 2])?;
    println!("Weight tensor shape: {:?}", w.shape());

    Ok(())
}
