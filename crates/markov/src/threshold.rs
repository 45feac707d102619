//! State threshold computation.
//!
//! Resolves wet/dry and wet/extreme thresholds from baseline precipitation
//! data and classifies daily precipitation into [`PrecipState`] values.

use crate::config::{MarkovConfig, ThresholdSpec};
use crate::error::MarkovError;
use crate::state::PrecipState;

/// Resolved precipitation thresholds for state classification.
///
/// The wet threshold is a single scalar applied globally. The extreme
/// thresholds are resolved per calendar month (1-indexed internally,
/// stored as a 12-element array indexed 0..12).
#[derive(Clone, Debug)]
pub struct StateThresholds {
    wet_threshold: f64,
    extreme_thresholds: [f64; 12],
}

impl StateThresholds {
    /// Resolve thresholds from baseline precipitation observations.
    ///
    /// # Arguments
    ///
    /// * `precip` - Daily precipitation values (may include zeros).
    /// * `months` - Corresponding 1-indexed calendar months (1 = January, ..., 12 = December).
    /// * `config` - Markov configuration containing threshold specifications.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError`] if the inputs are invalid (empty, mismatched
    /// lengths, non-finite values, or months outside 1..=12) or if the
    /// configuration fails validation.
    pub fn from_baseline(
        precip: &[f64],
        months: &[u8],
        config: &MarkovConfig,
    ) -> Result<Self, MarkovError> {
        // --- Validation ---
        if precip.is_empty() {
            return Err(MarkovError::EmptyData);
        }
        if precip.len() != months.len() {
            return Err(MarkovError::LengthMismatch {
                precip_len: precip.len(),
                months_len: months.len(),
            });
        }
        if precip.iter().any(|v| !v.is_finite()) {
            return Err(MarkovError::NonFiniteData);
        }
        for &m in months {
            if !(1..=12).contains(&m) {
                return Err(MarkovError::InvalidMonth { month: m });
            }
        }
        config.validate()?;

        // --- Wet threshold ---
        let wet_threshold = match config.wet_spec() {
            ThresholdSpec::Fixed(v) => v,
            ThresholdSpec::Quantile(q) => {
                let mut sorted: Vec<f64> = precip.to_vec();
                sorted.sort_by(|a, b| {
                    a.partial_cmp(b)
                        .expect("non-finite values excluded by validation")
                });
                quantile_type7(&sorted, q)
            }
        };

        // --- Extreme thresholds (per month) ---
        let extreme_thresholds = match config.extreme_spec() {
            ThresholdSpec::Fixed(v) => [v; 12],
            ThresholdSpec::Quantile(q) => {
                // Global fallback: quantile over all positive-precip days.
                let mut global_positive: Vec<f64> =
                    precip.iter().copied().filter(|&v| v > 0.0).collect();
                global_positive.sort_by(|a, b| {
                    a.partial_cmp(b)
                        .expect("non-finite values excluded by validation")
                });
                let global_fallback = if global_positive.is_empty() {
                    f64::INFINITY
                } else {
                    quantile_type7(&global_positive, q)
                };

                let mut thresholds = [0.0_f64; 12];
                for m in 0..12u8 {
                    let month_1 = m + 1;
                    // Collect positive-precip values for this month.
                    let mut month_positive: Vec<f64> = precip
                        .iter()
                        .zip(months.iter())
                        .filter(|&(&p, &mo)| mo == month_1 && p > 0.0)
                        .map(|(&p, _)| p)
                        .collect();

                    if month_positive.is_empty() {
                        // Check if the month has ANY data at all.
                        let has_any_data = months.contains(&month_1);
                        if has_any_data {
                            // Month exists but all values are zero → infinity.
                            thresholds[m as usize] = f64::INFINITY;
                        } else {
                            // Month has no data at all → global fallback.
                            thresholds[m as usize] = global_fallback;
                        }
                    } else {
                        month_positive.sort_by(|a, b| {
                            a.partial_cmp(b)
                                .expect("non-finite values excluded by validation")
                        });
                        thresholds[m as usize] = quantile_type7(&month_positive, q);
                    }
                }
                thresholds
            }
        };

        Ok(Self {
            wet_threshold,
            extreme_thresholds,
        })
    }

    /// Classify a single precipitation value into a [`PrecipState`].
    ///
    /// # Precondition
    ///
    /// `month` must be in 1..=12. This is **not** validated at runtime
    /// (hot path).
    #[inline]
    pub fn classify(&self, precip: f64, month: u8) -> PrecipState {
        if precip <= self.wet_threshold {
            PrecipState::Dry
        } else if precip > self.extreme_thresholds[month as usize - 1] {
            PrecipState::Extreme
        } else {
            PrecipState::Wet
        }
    }

    /// Classify a series of precipitation values.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::LengthMismatch`] if `precip` and `months`
    /// differ in length, or [`MarkovError::InvalidMonth`] if any month is
    /// outside 1..=12.
    pub fn classify_series(
        &self,
        precip: &[f64],
        months: &[u8],
    ) -> Result<Vec<PrecipState>, MarkovError> {
        if precip.len() != months.len() {
            return Err(MarkovError::LengthMismatch {
                precip_len: precip.len(),
                months_len: months.len(),
            });
        }
        for &m in months {
            if !(1..=12).contains(&m) {
                return Err(MarkovError::InvalidMonth { month: m });
            }
        }
        Ok(precip
            .iter()
            .zip(months.iter())
            .map(|(&p, &m)| self.classify(p, m))
            .collect())
    }

    /// Returns the global wet/dry threshold.
    pub fn wet_threshold(&self) -> f64 {
        self.wet_threshold
    }

    /// Returns the extreme threshold for a 1-indexed month.
    pub fn extreme_threshold(&self, month: u8) -> f64 {
        self.extreme_thresholds[month as usize - 1]
    }

    /// Returns all 12 extreme thresholds (indexed 0 = January, ..., 11 = December).
    pub fn extreme_thresholds(&self) -> &[f64; 12] {
        &self.extreme_thresholds
    }
}

/// R's default quantile algorithm (type = 7).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}
