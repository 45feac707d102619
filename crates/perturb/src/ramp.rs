//! Transient ramp utilities for scaling factors and deltas over time.

use crate::error::PerturbError;

/// How a monthly value should be ramped across simulation years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampMode {
    /// Ramp from 1.0 (no change) to `2 * factor - 1` (full change).
    /// Used for multiplicative factors like precipitation occurrence.
    Multiplicative,
    /// Ramp from 0.0 (no change) to `2 * delta` (full change).
    /// Used for additive deltas like temperature shifts.
    Additive,
}

/// Builds a per-year ramp of monthly values.
///
/// When `transient` is `false`, every year gets the raw `monthly` values unchanged.
///
/// When `transient` is `true`, values are linearly interpolated across years:
///
/// - **Multiplicative**: year `y` gets `1.0 + (2 * monthly[m] - 2) * frac`
///   where `frac = (y + 1) / n_years`. At year 0, frac ≈ 1/n; at the last year, frac = 1.0.
///   The midpoint reproduces the original `monthly` value.
///
/// - **Additive**: year `y` gets `2 * monthly[m] * frac`.
///   The midpoint reproduces the original `monthly` value.
///
/// # Errors
///
/// Returns [`PerturbError::InvalidConfig`] if `n_years` is zero.
pub fn build_ramp(
    monthly: &[f64; 12],
    n_years: usize,
    transient: bool,
    mode: RampMode,
) -> Result<Vec<[f64; 12]>, PerturbError> {
    if n_years == 0 {
        return Err(PerturbError::InvalidConfig {
            reason: "n_years must be > 0".to_string(),
        });
    }

    if !transient {
        return Ok(vec![*monthly; n_years]);
    }

    let mut result = Vec::with_capacity(n_years);
    for y in 0..n_years {
        let frac = (y + 1) as f64 / n_years as f64;
        let mut row = [0.0; 12];
        for m in 0..12 {
            row[m] = match mode {
                RampMode::Multiplicative => 1.0 + (2.0 * monthly[m] - 2.0) * frac,
                RampMode::Additive => 2.0 * monthly[m] * frac,
            };
        }
        result.push(row);
    }

    Ok(result)
}
