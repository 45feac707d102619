//! Core quantile mapping transform.

use std::collections::{BTreeMap, BTreeSet};

use statrs::distribution::ContinuousCDF;

use crate::config::QmConfig;
use crate::error::QuantileMapError;
use crate::fit::BaselineFit;
use crate::gamma::{GammaParams, gamma_dist};

/// Epsilon constant used for clamping CDF probabilities away from 0 and 1.
const EPS: f64 = 1e-12;

/// Amplify the upper tail of a CDF probability.
///
/// If `u > threshold`, maps `u` via `1 - (1-u)^k` and clamps to
/// `[EPS, 1 - EPS]`. Otherwise returns `u` unchanged.
pub(crate) fn amplify_tail(u: f64, threshold: f64, k: f64) -> f64 {
    if u > threshold {
        let amplified = 1.0 - (1.0 - u).powf(k);
        amplified.clamp(EPS, 1.0 - EPS)
    } else {
        u
    }
}

/// Group wet-day indices by `(month, year)`.
///
/// A single O(n) pass collects indices where the precipitation value is
/// non-NaN and exceeds `config.intensity_threshold()`. The returned
/// `BTreeMap` gives deterministic iteration order sorted by (month, year).
fn build_wet_day_groups(
    precip: &[f64],
    month: &[u8],
    year: &[u32],
    config: &QmConfig,
) -> BTreeMap<(u8, u32), Vec<usize>> {
    let mut groups: BTreeMap<(u8, u32), Vec<usize>> = BTreeMap::new();
    for i in 0..precip.len() {
        if !precip[i].is_nan() && precip[i] > config.intensity_threshold() {
            groups.entry((month[i], year[i])).or_default().push(i);
        }
    }
    groups
}

/// Apply the quantile mapping transform to a single month/year group.
///
/// For each index, the baseline CDF value is computed, optionally
/// tail-amplified, then inverted through the target distribution.
/// If `config.enforce_target_mean()` is set and the group is large enough,
/// the mapped values are rescaled so their mean matches `target_mean`.
fn transform_group(
    indices: &[usize],
    precip: &[f64],
    output: &mut [f64],
    base_dist: &statrs::distribution::Gamma,
    target_dist: &statrs::distribution::Gamma,
    target_mean: f64,
    config: &QmConfig,
) {
    for &i in indices {
        let mut u = base_dist.cdf(precip[i]);

        // Clamp to avoid exact 0 or 1 which can produce infinite quantiles.
        u = u.clamp(EPS, 1.0 - EPS);

        if config.exaggerate_extremes() {
            u = amplify_tail(u, config.extreme_prob_threshold(), config.extreme_k());
        }

        let mut mapped = target_dist.inverse_cdf(u);

        if config.validate_output() {
            if !mapped.is_finite() {
                mapped = precip[i];
            }
            if mapped < 0.0 {
                mapped = 0.0;
            }
        }

        output[i] = mapped;
    }

    // Enforce the target mean by rescaling if configured and the group is
    // large enough.
    if config.enforce_target_mean() && indices.len() >= config.min_group_for_enforcement() {
        let sum_mapped: f64 = indices.iter().map(|&i| output[i]).sum();
        let mean_mapped = sum_mapped / indices.len() as f64;

        if mean_mapped > EPS {
            let ratio = target_mean / mean_mapped;
            for &i in indices {
                output[i] *= ratio;
                if config.validate_output() && output[i] < 0.0 {
                    output[i] = 0.0;
                }
            }
        }
    }
}

/// Apply quantile mapping to a precipitation time-series.
///
/// Transforms `precip` from the baseline climate (described by `baseline`)
/// to each year's target climate (described by `target_params`).
///
/// # Returns
///
/// A tuple `(adjusted, perturbed_months, skipped_months)` where:
/// - `adjusted` has the same length as `precip` (dry days and NaN pass
///   through unchanged),
/// - `perturbed_months` lists the 1-indexed calendar months that were
///   successfully mapped, and
/// - `skipped_months` lists months that could not be mapped (missing
///   parameters or failed distribution construction).
#[allow(clippy::type_complexity)]
pub(crate) fn apply_quantile_mapping(
    precip: &[f64],
    month: &[u8],
    year: &[u32],
    baseline: &BaselineFit,
    target_params: &[[Option<GammaParams>; 12]],
    config: &QmConfig,
) -> Result<(Vec<f64>, Vec<u8>, Vec<u8>), QuantileMapError> {
    // Start with a copy of the input; dry days and NaN pass through.
    let mut output = precip.to_vec();

    let groups = build_wet_day_groups(precip, month, year, config);

    let mut perturbed_set = BTreeSet::<u8>::new();
    let mut skipped_set = BTreeSet::<u8>::new();

    for (&(m, y), indices) in &groups {
        // Baseline parameters for this calendar month.
        let base_params = match baseline.params_for_month(m) {
            Some(p) => p,
            None => {
                skipped_set.insert(m);
                continue;
            }
        };

        // Target parameters: year is 1-indexed in the data.
        let tgt_params = match target_params[(y - 1) as usize][(m - 1) as usize] {
            Some(p) => p,
            None => {
                skipped_set.insert(m);
                continue;
            }
        };

        // Build statrs distributions; skip the group on failure.
        let base_dist = match gamma_dist(&base_params) {
            Ok(d) => d,
            Err(_) => {
                skipped_set.insert(m);
                continue;
            }
        };
        let target_dist = match gamma_dist(&tgt_params) {
            Ok(d) => d,
            Err(_) => {
                skipped_set.insert(m);
                continue;
            }
        };

        transform_group(
            indices,
            precip,
            &mut output,
            &base_dist,
            &target_dist,
            tgt_params.mean(),
            config,
        );

        perturbed_set.insert(m);
    }

    Ok((
        output,
        perturbed_set.into_iter().collect(),
        skipped_set.into_iter().collect(),
    ))
}
