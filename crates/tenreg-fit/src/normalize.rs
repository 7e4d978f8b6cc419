//! Stabilizing rescale of factor pairs
//!
//! For every rank: `s = sqrt(‖v_r‖ / ‖u_r‖)`, `u_r ← s·u_r`, `v_r ← v_r / s`.
//! Afterwards `‖u_r‖ = ‖v_r‖` while `u_r v_rᵀ` is unchanged.

use crate::error::{DegeneratePhase, FitError};
use crate::factors::{check_divisor, FactorSet};
use crate::scalar::FitScalar;

/// Balance the norms of every `(u_r, v_r)` pair in place
///
/// # Errors
///
/// [`FitError::DegenerateFactor`] with phase `Normalize` if either norm is at
/// or below `tol`. No pair is modified in that case.
pub fn stabilize<T: FitScalar>(factors: &mut FactorSet<T>, tol: T) -> Result<(), FitError> {
    let mut scales = Vec::with_capacity(factors.rank());
    for (r, (u, v)) in factors.pairs().enumerate() {
        let u_norm = check_divisor(u.dot(u).sqrt(), tol, r, DegeneratePhase::Normalize)?;
        let v_norm = check_divisor(v.dot(v).sqrt(), tol, r, DegeneratePhase::Normalize)?;
        scales.push((v_norm / u_norm).sqrt());
    }

    for (r, scale) in scales.into_iter().enumerate() {
        factors.us[r].mapv_inplace(|x| x * scale);
        factors.vs[r].mapv_inplace(|x| x / scale);
    }
    Ok(())
}
