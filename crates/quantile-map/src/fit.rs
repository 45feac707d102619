//! Baseline Gamma distribution fitting for monthly precipitation.

use crate::config::QmConfig;
use crate::gamma::GammaParams;

/// Result of fitting Gamma distributions to monthly precipitation data.
///
/// Contains one optional [`GammaParams`] per calendar month (12 total),
/// along with metadata about which months were skipped and how many fits
/// failed.
#[derive(Debug, Clone)]
pub struct BaselineFit {
    params: [Option<GammaParams>; 12],
    skipped_months: Vec<u8>,
    n_failed_fits: usize,
}

impl BaselineFit {
    /// Creates a new `BaselineFit` from pre-computed arrays.
    pub(crate) fn new(
        params: [Option<GammaParams>; 12],
        skipped_months: Vec<u8>,
        n_failed_fits: usize,
    ) -> Self {
        Self {
            params,
            skipped_months,
            n_failed_fits,
        }
    }

    /// Returns the fitted Gamma parameters for a 1-indexed calendar month.
    ///
    /// # Panics
    ///
    /// Panics if `month` is 0 or greater than 12.
    pub fn params_for_month(&self, month: u8) -> Option<GammaParams> {
        assert!(
            (1..=12).contains(&month),
            "month must be in 1..=12, got {month}"
        );
        self.params[(month - 1) as usize]
    }

    /// Returns a reference to the full 12-element parameter array (0-indexed).
    pub fn params(&self) -> &[Option<GammaParams>; 12] {
        &self.params
    }

    /// Returns 1-indexed months that have successfully fitted parameters.
    pub fn fitted_months(&self) -> Vec<u8> {
        self.params
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|_| (i + 1) as u8))
            .collect()
    }

    /// Returns the 1-indexed months that were skipped during fitting.
    pub fn skipped_months(&self) -> &[u8] {
        &self.skipped_months
    }

    /// Returns the number of months where fitting was attempted but failed.
    pub fn n_failed_fits(&self) -> usize {
        self.n_failed_fits
    }

    /// Returns `true` if all 12 months are `None` (no successful fits).
    pub fn is_empty(&self) -> bool {
        self.params.iter().all(|p| p.is_none())
    }
}

/// Fit a Gamma distribution to a slice of (wet-day) values using the
/// method of moments.
///
/// Returns `None` if there are fewer than 3 unique values, the sample
/// variance is near zero, or the moment estimates produce invalid parameters.
pub(crate) fn fit_gamma_mme(values: &[f64]) -> Option<GammaParams> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().copied().sum::<f64>() / n as f64;

    let variance = values
        .iter()
        .copied()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;

    if count_unique(values) < 3 {
        return None;
    }

    if variance <= 1e-10 {
        return None;
    }

    GammaParams::from_moments(mean, variance)
}

/// Counts the number of unique values in a slice, using an epsilon
/// tolerance of 1e-10 for floating-point comparison.
fn count_unique(values: &[f64]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    sorted
        .windows(2)
        .filter(|w| (w[1] - w[0]).abs() > 1e-10)
        .count()
        + 1
}

/// Fit Gamma distributions to monthly precipitation data.
///
/// For each calendar month (1..=12), collects wet-day values that exceed
/// `config.intensity_threshold()`, then fits a Gamma distribution via
/// method-of-moments if enough events are present.
pub(crate) fn fit_monthly(precip: &[f64], month: &[u8], config: &QmConfig) -> BaselineFit {
    let mut params: [Option<GammaParams>; 12] = [None; 12];
    let mut skipped_months = Vec::new();
    let mut n_failed_fits = 0usize;

    for m in 1u8..=12 {
        let wet_values: Vec<f64> = precip
            .iter()
            .zip(month.iter())
            .filter(|&(&p, &mo)| mo == m && p > config.intensity_threshold() && !p.is_nan())
            .map(|(&p, _)| p)
            .collect();

        if wet_values.len() < config.min_events() {
            skipped_months.push(m);
            params[(m - 1) as usize] = None;
        } else {
            match fit_gamma_mme(&wet_values) {
                Some(gp) => {
                    params[(m - 1) as usize] = Some(gp);
                }
                None => {
                    n_failed_fits += 1;
                    skipped_months.push(m);
                    params[(m - 1) as usize] = None;
                }
            }
        }
    }

    BaselineFit::new(params, skipped_months, n_failed_fits)
}
