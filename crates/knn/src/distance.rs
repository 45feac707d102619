//! Weighted squared Euclidean distance computation.

/// Computes weighted squared Euclidean distances from `target` to all candidates.
///
/// For each candidate row `i`:
/// ```text
/// out[i] = Σⱼ weights[j] × (candidates[i × n_vars + j] − target[j])²
/// ```
///
/// Dispatches to specialised implementations for 1D and 2D cases.
///
/// # Panics
///
/// Debug-asserts that `candidates.len() % n_vars == 0`, `target.len() == n_vars`,
/// `weights.len() == n_vars`, and `out.len() == candidates.len() / n_vars`.
pub(crate) fn weighted_sq_distances(
    candidates: &[f64],
    n_vars: usize,
    target: &[f64],
    weights: &[f64],
    out: &mut [f64],
) {
    let n_candidates = candidates.len() / n_vars;
    debug_assert_eq!(candidates.len() % n_vars, 0);
    debug_assert_eq!(target.len(), n_vars);
    debug_assert_eq!(weights.len(), n_vars);
    debug_assert_eq!(out.len(), n_candidates);

    match n_vars {
        1 => weighted_sq_dist_1d(candidates, target[0], weights[0], out),
        2 => weighted_sq_dist_2d(candidates, target, weights, out),
        _ => weighted_sq_dist_nd(candidates, n_vars, target, weights, out),
    }
}

#[inline]
fn weighted_sq_dist_1d(candidates: &[f64], target: f64, weight: f64, out: &mut [f64]) {
    for (o, &c) in out.iter_mut().zip(candidates.iter()) {
        let d = c - target;
        *o = weight * d * d;
    }
}

#[inline]
fn weighted_sq_dist_2d(candidates: &[f64], target: &[f64], weights: &[f64], out: &mut [f64]) {
    let t0 = target[0];
    let t1 = target[1];
    let w0 = weights[0];
    let w1 = weights[1];
    for (i, o) in out.iter_mut().enumerate() {
        let d0 = candidates[i * 2] - t0;
        let d1 = candidates[i * 2 + 1] - t1;
        *o = w0 * d0 * d0 + w1 * d1 * d1;
    }
}

#[inline]
fn weighted_sq_dist_nd(
    candidates: &[f64],
    n_vars: usize,
    target: &[f64],
    weights: &[f64],
    out: &mut [f64],
) {
    for (i, o) in out.iter_mut().enumerate() {
        let row = &candidates[i * n_vars..(i + 1) * n_vars];
        let mut acc = 0.0;
        for j in 0..n_vars {
            let d = row[j] - target[j];
            acc += weights[j] * d * d;
        }
        *o = acc;
    }
}
