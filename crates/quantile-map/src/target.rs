//! Target Gamma parameter computation from baseline fits and scenario factors.

use crate::config::QmConfig;
use crate::factors::ScenarioFactors;
use crate::fit::BaselineFit;
use crate::gamma::GammaParams;

/// Compute target Gamma parameters for each (year, month) by scaling baseline
/// moments with scenario factors.
///
/// For every year/month combination the baseline fit is combined with the
/// corresponding mean and variance factors.  When
/// [`QmConfig::scale_var_with_mean`] is `true` the variance factor is further
/// multiplied by `mean_factor²` so that the coefficient of variation is
/// preserved under pure mean scaling.
///
/// Returns a `Vec` of length `mean_factors.n_years()`, where each element is
/// a 12-element array (0-indexed by month) of `Option<GammaParams>`.
pub(crate) fn compute_target_params(
    baseline: &BaselineFit,
    mean_factors: &ScenarioFactors,
    var_factors: &ScenarioFactors,
    config: &QmConfig,
) -> Vec<[Option<GammaParams>; 12]> {
    let n_years = mean_factors.n_years();
    let mut result: Vec<[Option<GammaParams>; 12]> = Vec::with_capacity(n_years);

    for y in 0..n_years {
        let mut row: [Option<GammaParams>; 12] = [None; 12];

        for m in 1u8..=12 {
            // 1. Get baseline params; skip if None.
            let baseline_params = match baseline.params_for_month(m) {
                Some(p) => p,
                None => continue,
            };

            // 2. Look up the scenario factors for this year and month.
            let mean_factor = mean_factors.get(y as u32, m);
            let var_factor = var_factors.get(y as u32, m);

            // 3. Compute target moments.
            let target_mean = baseline_params.mean() * mean_factor;

            let effective_var_factor = if config.scale_var_with_mean() {
                var_factor * mean_factor * mean_factor
            } else {
                var_factor
            };
            let target_var = baseline_params.var() * effective_var_factor;

            // 4. Guard: both moments must be finite and positive.
            if !target_mean.is_finite()
                || target_mean <= 0.0
                || !target_var.is_finite()
                || target_var <= 0.0
            {
                continue;
            }

            // 5. Convert moments to Gamma parameters (may return None).
            row[(m - 1) as usize] = GammaParams::from_moments(target_mean, target_var);
        }

        result.push(row);
    }

    result
}
