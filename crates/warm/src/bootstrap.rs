//! Block bootstrap and ARMA viability checks for the WARM pipeline.

use rand::Rng;

/// Returns `true` if the data slice `x` is suitable for ARMA fitting.
///
/// The checks performed are:
/// 1. All elements are finite (no NaN or infinity).
/// 2. Length is at least `max(8, max_p + max_q + 2)`.
/// 3. Sample standard deviation is at least 1e-8 (data is not constant).
/// 4. At least 3 unique values are present.
pub(crate) fn is_arma_viable(x: &[f64], max_p: usize, max_q: usize) -> bool {
    // 1. All elements must be finite.
    if !x.iter().all(|v| v.is_finite()) {
        return false;
    }

    // 2. Minimum length requirement.
    let min_len = 8_usize.max(max_p + max_q + 2);
    if x.len() < min_len {
        return false;
    }

    // 3. Sample standard deviation >= 1e-8.
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    let sd = var.sqrt();
    if sd < 1e-8 {
        return false;
    }

    // 4. At least 3 unique values.
    let mut unique_bits: Vec<u64> = x.iter().map(|v| v.to_bits()).collect();
    unique_bits.sort_unstable();
    unique_bits.dedup();
    if unique_bits.len() < 3 {
        return false;
    }

    true
}

/// Generates block bootstrap resamples from the input series `x`.
///
/// Produces `n_sim` realisations, each of length `n`, by repeatedly sampling
/// contiguous blocks of data from `x` and concatenating them.
///
/// # Arguments
///
/// * `x`     - The original time series to resample from.
/// * `n`     - Desired length of each bootstrap replicate.
/// * `n_sim` - Number of replicates to generate.
/// * `rng`   - Random number generator.
///
/// # Block length
///
/// The block length `b` is `floor(sqrt(m))` clamped to `[3, m]`, where
/// `m = x.len()`. For very short series (`m < 3`), `b = m`.
pub(crate) fn block_bootstrap(
    x: &[f64],
    n: usize,
    n_sim: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<f64>> {
    let m = x.len();

    if m == 0 || n == 0 {
        return vec![vec![]; n_sim];
    }

    // Determine block length.
    let b = if m < 3 {
        m
    } else {
        let raw = (m as f64).sqrt().floor() as usize;
        raw.clamp(3, m)
    };

    let mut result = Vec::with_capacity(n_sim);

    for _ in 0..n_sim {
        let mut series = Vec::with_capacity(n);

        while series.len() < n {
            let start = if m == b {
                0
            } else {
                rng.random_range(0..=(m - b))
            };
            series.extend_from_slice(&x[start..start + b]);
        }

        series.truncate(n);
        result.push(series);
    }

    result
}
