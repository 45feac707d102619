//! KNN sampling entry point and scratch buffer management.

use rand::Rng;

use crate::config::KnnConfig;
use crate::distance::weighted_sq_distances;
use crate::error::KnnError;
use crate::result::KnnResult;
use crate::sample::{compute_probs, weighted_sample};
use crate::select::select_k_nearest;

/// Pre-allocated scratch buffers for KNN sampling.
///
/// Reuse across multiple calls to [`knn_sample_with_scratch`] to avoid
/// repeated heap allocation in hot loops (e.g. 365 daily KNN calls per year).
///
/// # Example
///
/// ```
/// use zeus_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(200);
/// // Use with knn_sample_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone)]
pub struct KnnScratch {
    /// Squared distances buffer.
    pub(crate) d2_sq: Vec<f64>,
    /// (distance, index) pairs for sorting.
    pub(crate) pairs: Vec<(f64, usize)>,
    /// Indices of k nearest neighbors.
    pub(crate) nn_indices: Vec<usize>,
    /// Euclidean distances of k nearest neighbors.
    pub(crate) nn_dists: Vec<f64>,
    /// Sampling probabilities.
    pub(crate) probs: Vec<f64>,
    /// CDF buffer for weighted sampling.
    pub(crate) cdf: Vec<f64>,
    /// Sampled local indices (before mapping back to candidate indices).
    pub(crate) sampled: Vec<usize>,
}

impl KnnScratch {
    /// Creates a new scratch buffer with capacity for `max_candidates` candidates.
    pub fn new(max_candidates: usize) -> Self {
        Self {
            d2_sq: Vec::with_capacity(max_candidates),
            pairs: Vec::with_capacity(max_candidates),
            nn_indices: Vec::with_capacity(max_candidates),
            nn_dists: Vec::with_capacity(max_candidates),
            probs: Vec::with_capacity(max_candidates),
            cdf: Vec::with_capacity(max_candidates),
            sampled: Vec::with_capacity(max_candidates),
        }
    }
}

/// Validates all inputs and returns the derived `n_candidates`.
fn validate_inputs(
    candidates: &[f64],
    n_vars: usize,
    target: &[f64],
    weights: &[f64],
    config: &KnnConfig,
) -> Result<usize, KnnError> {
    // Config validation first
    config.validate()?;

    // n_vars must be >= 1 to avoid division by zero
    if n_vars == 0 {
        return Err(KnnError::CandidatesShapeMismatch {
            len: candidates.len(),
            n_vars,
        });
    }

    // Candidates shape check
    if candidates.is_empty() {
        return Err(KnnError::EmptyCandidates);
    }
    if !candidates.len().is_multiple_of(n_vars) {
        return Err(KnnError::CandidatesShapeMismatch {
            len: candidates.len(),
            n_vars,
        });
    }

    let n_candidates = candidates.len() / n_vars;

    // Dimension checks
    if target.len() != n_vars {
        return Err(KnnError::TargetDimensionMismatch {
            target: target.len(),
            n_vars,
        });
    }
    if weights.len() != n_vars {
        return Err(KnnError::WeightsDimensionMismatch {
            weights: weights.len(),
            n_vars,
        });
    }

    // NaN guards on target and weights (cheap — small arrays)
    if target.iter().any(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteInput { input: "target" });
    }
    if weights.iter().any(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteInput { input: "weights" });
    }

    Ok(n_candidates)
}

/// Internal implementation that assumes all inputs are validated.
#[allow(clippy::too_many_arguments)]
fn knn_sample_inner(
    candidates: &[f64],
    n_candidates: usize,
    n_vars: usize,
    target: &[f64],
    weights: &[f64],
    config: &KnnConfig,
    rng: &mut impl Rng,
    scratch: &mut KnnScratch,
) -> KnnResult {
    // Step 1: Compute k_eff
    let k_eff = config.k().min(n_candidates);

    // Step 2: Compute weighted squared distances
    scratch.d2_sq.clear();
    scratch.d2_sq.resize(n_candidates, 0.0);
    weighted_sq_distances(candidates, n_vars, target, weights, &mut scratch.d2_sq);

    // Step 3: Select k nearest neighbors
    select_k_nearest(
        &scratch.d2_sq,
        k_eff,
        &mut scratch.pairs,
        &mut scratch.nn_indices,
        &mut scratch.nn_dists,
    );

    // Step 4: Compute sampling probabilities
    compute_probs(
        &scratch.nn_dists,
        config.sampling(),
        config.epsilon(),
        &mut scratch.probs,
    );

    // Step 5: Sample from probabilities
    weighted_sample(
        &scratch.probs,
        config.n(),
        rng,
        &mut scratch.cdf,
        &mut scratch.sampled,
    );

    // Step 6: Map local indices back to original candidate indices
    let indices: Vec<usize> = scratch
        .sampled
        .iter()
        .map(|&local| scratch.nn_indices[local])
        .collect();

    // Step 7: Build result
    KnnResult::new(indices, scratch.nn_dists.clone())
}

/// Performs KNN sampling, allocating scratch buffers internally.
///
/// This is the simple entry point. For hot loops, use
/// [`knn_sample_with_scratch`] to reuse allocations.
///
/// # Arguments
///
/// * `candidates` — flat row-major candidate matrix `[n_candidates × n_vars]`
/// * `n_vars` — number of variables per candidate (1 for annual, 2 for daily)
/// * `target` — query point `[n_vars]`
/// * `weights` — per-variable distance weights `[n_vars]`
/// * `config` — KNN configuration (k, n, sampling scheme, epsilon)
/// * `rng` — random number generator
///
/// # Errors
///
/// Returns [`KnnError`] if inputs are invalid (empty candidates, dimension
/// mismatches, non-finite target/weights, invalid config).
pub fn knn_sample(
    candidates: &[f64],
    n_vars: usize,
    target: &[f64],
    weights: &[f64],
    config: &KnnConfig,
    rng: &mut impl Rng,
) -> Result<KnnResult, KnnError> {
    let n_candidates = validate_inputs(candidates, n_vars, target, weights, config)?;
    let mut scratch = KnnScratch::new(n_candidates);
    Ok(knn_sample_inner(
        candidates,
        n_candidates,
        n_vars,
        target,
        weights,
        config,
        rng,
        &mut scratch,
    ))
}

/// Performs KNN sampling, reusing pre-allocated scratch buffers.
///
/// Identical to [`knn_sample`] but avoids heap allocation by reusing `scratch`.
/// Buffers grow as needed and never shrink, making this ideal for hot loops
/// where candidate counts vary.
///
/// # Arguments
///
/// * `candidates` — flat row-major candidate matrix `[n_candidates × n_vars]`
/// * `n_vars` — number of variables per candidate
/// * `target` — query point `[n_vars]`
/// * `weights` — per-variable distance weights `[n_vars]`
/// * `config` — KNN configuration
/// * `rng` — random number generator
/// * `scratch` — reusable scratch buffers (see [`KnnScratch::new`])
///
/// # Errors
///
/// Returns [`KnnError`] if inputs are invalid.
pub fn knn_sample_with_scratch(
    candidates: &[f64],
    n_vars: usize,
    target: &[f64],
    weights: &[f64],
    config: &KnnConfig,
    rng: &mut impl Rng,
    scratch: &mut KnnScratch,
) -> Result<KnnResult, KnnError> {
    let n_candidates = validate_inputs(candidates, n_vars, target, weights, config)?;
    Ok(knn_sample_inner(
        candidates,
        n_candidates,
        n_vars,
        target,
        weights,
        config,
        rng,
        scratch,
    ))
}
