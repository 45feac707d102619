//! ARMA state-space representation.
//!
//! Converts ARMA(p,q) coefficients into state-space form:
//!
//! ```text
//! x[t+1] = T * x[t] + R * e[t]     (state transition)
//! y[t]   = Z' * x[t]                (observation)
//! ```
//!
//! where `T` is the transition matrix, `R` the noise-input vector,
//! `Z` the observation vector, and `e[t] ~ N(0, sigma2)`.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

/// State-space representation of an ARMA(p,q) model.
///
/// Holds the transition matrix `T`, noise input vector `R`, and
/// precomputed `R·Rᵀ` for the Kalman filter.
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    r: usize,
    t: Array2<f64>,
    r_vec: Array1<f64>,
    rrt: Array2<f64>,
}

#[allow(dead_code)]
impl StateSpace {
    /// Builds a state-space representation from AR and MA coefficients.
    ///
    /// # Panics
    ///
    /// Does not panic — validation happens upstream in `ArmaSpec`.
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let r = p.max(q + 1).max(1);

        // Build transition matrix T (r×r) in companion form.
        // First column: T[i, 0] = ar[i] for i < p.
        // Super-diagonal: T[i, i+1] = 1.0 for i = 0..r-2.
        let mut t = Array2::zeros((r, r));
        for i in 0..p {
            t[[i, 0]] = ar[i];
        }
        for i in 0..r.saturating_sub(1) {
            t[[i, i + 1]] = 1.0;
        }

        // Build noise input vector R (length r).
        // R[0] = 1.0, R[j+1] = ma[j] for j = 0..q-1.
        let mut r_vec = Array1::zeros(r);
        r_vec[0] = 1.0;
        for j in 0..q {
            r_vec[j + 1] = ma[j];
        }

        // Compute RRᵀ as the outer product of R with itself.
        let r_col = r_vec.view().insert_axis(Axis(1)); // (r, 1)
        let r_row = r_vec.view().insert_axis(Axis(0)); // (1, r)
        let rrt = r_col.dot(&r_row);

        Self { r, t, r_vec, rrt }
    }

    /// State dimension `r = max(p, q+1)`, minimum 1.
    pub(crate) fn r(&self) -> usize {
        self.r
    }

    /// Transition matrix `T` (r×r) in companion form.
    pub(crate) fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// Noise input vector `R = [1, θ₁, …, θ_q, 0, …, 0]` (length r).
    pub(crate) fn r_vec(&self) -> &Array1<f64> {
        &self.r_vec
    }

    /// Precomputed `R·Rᵀ` (r×r), the rank-1 outer product.
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }
}
