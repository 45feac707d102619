//! Top-k nearest neighbor selection.

use std::cmp::Ordering;

/// Selects the `k_eff` nearest neighbors from squared distances.
///
/// Uses full sort on (distance, index) pairs — efficient and cache-friendly for
/// the typical 10–200 candidate range. A partial-sort (`select_nth_unstable`)
/// optimisation can be added later if profiling shows it worthwhile.
///
/// Writes results into caller-provided buffers:
/// - `pairs`: scratch buffer for (distance, index) pairs
/// - `nn_indices`: indices of the k nearest neighbors (sorted by ascending distance)
/// - `nn_dists`: Euclidean distances (sqrt of squared distances) of the k nearest neighbors
///
/// # Panics
///
/// Debug-asserts that `k_eff >= 1` and `k_eff <= d2_sq.len()`.
pub(crate) fn select_k_nearest(
    d2_sq: &[f64],
    k_eff: usize,
    pairs: &mut Vec<(f64, usize)>,
    nn_indices: &mut Vec<usize>,
    nn_dists: &mut Vec<f64>,
) {
    debug_assert!(k_eff >= 1);
    debug_assert!(k_eff <= d2_sq.len());

    // Build (distance, original_index) pairs
    pairs.clear();
    pairs.extend(d2_sq.iter().copied().enumerate().map(|(i, d)| (d, i)));

    // Full sort — NaN-safe via Ordering::Equal fallback
    pairs.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    pairs.truncate(k_eff);

    // Extract indices and sqrt distances
    nn_indices.clear();
    nn_dists.clear();
    for &(d2, idx) in pairs.iter() {
        nn_indices.push(idx);
        nn_dists.push(d2.sqrt());
    }
}
