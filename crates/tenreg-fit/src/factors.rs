//! Factor pairs and the coordinate-descent sweep
//!
//! The weight matrix is never stored; it is represented by R pairs
//! `(u_r ∈ ℝ^I, v_r ∈ ℝ^J)` with `W = Σᵣ u_r v_rᵀ`. One sweep updates every
//! `u_r` in index order, then every `v_r` in index order:
//!
//! ```text
//! u_r ← G⁻¹ (C v_r − ½ Σ_{s≠r} (v_s·v_r) G u_s) / (v_r·v_r)
//! v_r ← (Cᵀ u_r − ½ Σ_{s≠r} (u_rᵀ G u_s) v_s) / (u_rᵀ G u_r)
//! ```
//!
//! Updates are Gauss–Seidel: rank `r` sees the values already written for
//! ranks `< r` in the same sweep and last sweep's values for ranks `> r`.
//! Running the R updates of one phase in parallel would change the result.

use scirs2_core::ndarray_ext::{Array1, Array2};
use scirs2_core::random::Rng;
use tenreg_core::DenseND;

use crate::config::InitStrategy;
use crate::error::{DegeneratePhase, FitError};
use crate::operators::RegularizedOperators;
use crate::scalar::{to_f64, FitScalar};

/// R pairs of factor vectors defining a rank-R weight matrix
#[derive(Debug, Clone, PartialEq)]
pub struct FactorSet<T> {
    pub(crate) us: Vec<Array1<T>>,
    pub(crate) vs: Vec<Array1<T>>,
}

impl<T: FitScalar> FactorSet<T> {
    /// Draw mean-zero random factors
    pub fn random<R: Rng>(
        rank: usize,
        input_dim: usize,
        output_dim: usize,
        init: InitStrategy,
        rng: &mut R,
    ) -> Result<Self, FitError> {
        if rank == 0 {
            return Err(FitError::InvalidRank(rank));
        }

        let mut draw = |len: usize| -> Array1<T> {
            let t = match init {
                InitStrategy::RandomNormal => DenseND::<T>::random_normal(&[len], 0.0, 1.0, rng),
                InitStrategy::RandomUniform => {
                    DenseND::<T>::random_uniform(&[len], -1.0, 1.0, rng)
                }
            };
            Array1::from(t.to_vec())
        };

        let mut us = Vec::with_capacity(rank);
        let mut vs = Vec::with_capacity(rank);
        for _ in 0..rank {
            us.push(draw(input_dim));
            vs.push(draw(output_dim));
        }

        Ok(Self { us, vs })
    }

    /// Build a factor set from explicit `(u_r, v_r)` pairs
    ///
    /// All `u_r` must share one length and all `v_r` another.
    pub fn from_pairs(pairs: Vec<(Array1<T>, Array1<T>)>) -> Result<Self, FitError> {
        let Some((u0, v0)) = pairs.first() else {
            return Err(FitError::InvalidRank(0));
        };
        let (input_dim, output_dim) = (u0.len(), v0.len());

        for (r, (u, v)) in pairs.iter().enumerate() {
            if u.len() != input_dim || v.len() != output_dim {
                return Err(FitError::InvalidConfig(format!(
                    "factor pair {} has lengths ({}, {}), expected ({}, {})",
                    r,
                    u.len(),
                    v.len(),
                    input_dim,
                    output_dim
                )));
            }
        }

        let (us, vs) = pairs.into_iter().unzip();
        Ok(Self { us, vs })
    }

    /// Number of outer-product terms R
    pub fn rank(&self) -> usize {
        self.us.len()
    }

    /// Length I of each `u_r`
    pub fn input_dim(&self) -> usize {
        self.us[0].len()
    }

    /// Length J of each `v_r`
    pub fn output_dim(&self) -> usize {
        self.vs[0].len()
    }

    pub fn u(&self, r: usize) -> &Array1<T> {
        &self.us[r]
    }

    pub fn v(&self, r: usize) -> &Array1<T> {
        &self.vs[r]
    }

    /// Iterate over `(u_r, v_r)` in rank order
    pub fn pairs(&self) -> impl Iterator<Item = (&Array1<T>, &Array1<T>)> {
        self.us.iter().zip(self.vs.iter())
    }

    /// Outer product `u_r v_rᵀ` of one pair
    pub fn component(&self, r: usize) -> Array2<T> {
        outer(&self.us[r], &self.vs[r])
    }

    /// `W = Σᵣ u_r v_rᵀ` (I × J)
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::array;
    /// use tenreg_fit::FactorSet;
    ///
    /// let factors = FactorSet::from_pairs(vec![
    ///     (array![1.0, 2.0], array![1.0, 0.0, -1.0]),
    ///     (array![0.0, 1.0], array![0.0, 3.0, 0.0]),
    /// ]).unwrap();
    /// let w = factors.weight_matrix();
    /// assert_eq!(w, array![[1.0, 0.0, -1.0], [2.0, 3.0, -2.0]]);
    /// ```
    pub fn weight_matrix(&self) -> Array2<T> {
        let mut w = Array2::<T>::zeros((self.input_dim(), self.output_dim()));
        for (u, v) in self.pairs() {
            for (i, &ui) in u.iter().enumerate() {
                w.row_mut(i).scaled_add(ui, v);
            }
        }
        w
    }
}

fn outer<T: FitScalar>(u: &Array1<T>, v: &Array1<T>) -> Array2<T> {
    Array2::from_shape_fn((u.len(), v.len()), |(i, j)| u[i] * v[j])
}

/// `Err(DegenerateFactor)` unless `|value|` is finite and above `tol`
pub(crate) fn check_divisor<T: FitScalar>(
    value: T,
    tol: T,
    rank: usize,
    phase: DegeneratePhase,
) -> Result<T, FitError> {
    if value.is_finite() && value.abs() > tol {
        Ok(value)
    } else {
        Err(FitError::DegenerateFactor {
            rank,
            phase,
            value: to_f64(value),
        })
    }
}

/// Owns the factor set of one fit and runs coordinate-descent sweeps
///
/// The operators are borrowed read-only; nothing here is shared between
/// fit calls.
pub struct FactorUpdateEngine<'a, T> {
    ops: &'a RegularizedOperators<T>,
    factors: FactorSet<T>,
    // G u_s for every rank, kept in sync with `factors.us` during a sweep
    gu: Vec<Array1<T>>,
    tol: T,
}

impl<'a, T: FitScalar> FactorUpdateEngine<'a, T> {
    /// Take ownership of `factors` for updates against `ops`
    ///
    /// `tol` is the magnitude at or below which a divisor counts as zero.
    pub fn new(
        ops: &'a RegularizedOperators<T>,
        factors: FactorSet<T>,
        tol: T,
    ) -> Result<Self, FitError> {
        if factors.input_dim() != ops.input_dim() || factors.output_dim() != ops.output_dim() {
            return Err(FitError::InvalidConfig(format!(
                "factor dimensions ({}, {}) do not match operators ({}, {})",
                factors.input_dim(),
                factors.output_dim(),
                ops.input_dim(),
                ops.output_dim()
            )));
        }
        Ok(Self {
            ops,
            factors,
            gu: Vec::new(),
            tol,
        })
    }

    pub fn factors(&self) -> &FactorSet<T> {
        &self.factors
    }

    pub fn into_factors(self) -> FactorSet<T> {
        self.factors
    }

    /// One full sweep: all `u_r` in order, then all `v_r` in order
    ///
    /// # Errors
    ///
    /// [`FitError::DegenerateFactor`] if `v_r·v_r` or `u_rᵀ G u_r` is
    /// numerically zero. The check happens before the division, so the
    /// factor set never receives NaN or infinite entries from it.
    pub fn sweep(&mut self) -> Result<(), FitError> {
        let ops = self.ops;
        let gram = ops.gram();
        let half = T::one() / (T::one() + T::one());
        let rank = self.factors.rank();

        self.gu = self.factors.us.iter().map(|u| gram.dot(u)).collect();

        for r in 0..rank {
            let vv = self.factors.vs[r].dot(&self.factors.vs[r]);
            let vv = check_divisor(vv, self.tol, r, DegeneratePhase::UpdateU)?;

            let mut rhs = ops.cross().dot(&self.factors.vs[r]);
            for s in (0..rank).filter(|&s| s != r) {
                let coeff = self.factors.vs[s].dot(&self.factors.vs[r]);
                rhs.scaled_add(-half * coeff, &self.gu[s]);
            }

            let u_new = ops.gram_inv().dot(&rhs) / vv;
            self.gu[r] = gram.dot(&u_new);
            self.factors.us[r] = u_new;
        }

        for r in 0..rank {
            let ugu = self.factors.us[r].dot(&self.gu[r]);
            let ugu = check_divisor(ugu, self.tol, r, DegeneratePhase::UpdateV)?;

            let mut rhs = ops.cross_t().dot(&self.factors.us[r]);
            for s in (0..rank).filter(|&s| s != r) {
                let coeff = self.factors.us[r].dot(&self.gu[s]);
                rhs.scaled_add(-half * coeff, &self.factors.vs[s]);
            }

            self.factors.vs[r] = rhs / ugu;
        }

        Ok(())
    }

    /// Apply the stabilizing rescale to the owned factors
    pub fn normalize(&mut self) -> Result<(), FitError> {
        crate::normalize::stabilize(&mut self.factors, self.tol)
    }
}
