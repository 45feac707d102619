//! Temperature adjustment module.
//!
//! Applies additive per-year monthly deltas to temperature series,
//! optionally ramped linearly over the simulation period.

use crate::config::TempConfig;
use crate::error::PerturbError;
use crate::ramp::{RampMode, build_ramp};
use crate::result::TempResult;

/// Pre-computed temperature deltas per year.
#[derive(Debug, Clone)]
pub struct TempDeltas {
    inner: Vec<[f64; 12]>,
}

impl TempDeltas {
    /// Build deltas from a `TempConfig` and the number of simulation years.
    ///
    /// If `config.transient()` is true, ramps additively from 0 to 2*delta.
    /// Otherwise, every year uses the raw deltas.
    pub fn from_config(config: &TempConfig, n_years: usize) -> Result<Self, PerturbError> {
        let ramp = build_ramp(
            config.deltas(),
            n_years,
            config.transient(),
            RampMode::Additive,
        )?;
        Ok(Self { inner: ramp })
    }

    /// Returns the delta for a 1-indexed year and 1-indexed month.
    ///
    /// Year indices in the data are 1-based (year 1 maps to inner\[0\]).
    pub fn get(&self, year: u32, month: u8) -> f64 {
        self.inner[(year - 1) as usize][(month - 1) as usize]
    }

    /// Returns the number of years.
    pub fn n_years(&self) -> usize {
        self.inner.len()
    }
}

/// Adjusts temperature series by adding per-year monthly deltas.
///
/// For each day, adds `deltas.get(year, month)` to the temperature value.
/// `temp_min` and `temp_max`, if provided, are shifted by the same delta.
/// NaN values pass through unchanged.
///
/// # Errors
///
/// Returns `PerturbError::EmptyData` if `temp` is empty.
/// Returns `PerturbError::LengthMismatch` if `month` or `year` lengths differ from `temp`.
/// Returns `PerturbError::InvalidMonth` if any month is outside 1..=12.
/// Returns `PerturbError::YearMismatch` if any year index is out of range for the deltas.
pub fn adjust_temperature(
    temp: &[f64],
    temp_min: Option<&[f64]>,
    temp_max: Option<&[f64]>,
    month: &[u8],
    year: &[u32],
    deltas: &TempDeltas,
) -> Result<TempResult, PerturbError> {
    let n = temp.len();

    // Validate non-empty
    if n == 0 {
        return Err(PerturbError::EmptyData);
    }

    // Validate lengths match
    if month.len() != n {
        return Err(PerturbError::LengthMismatch {
            expected: n,
            got: month.len(),
            field: "month".to_string(),
        });
    }
    if year.len() != n {
        return Err(PerturbError::LengthMismatch {
            expected: n,
            got: year.len(),
            field: "year".to_string(),
        });
    }
    if let Some(tmin) = temp_min
        && tmin.len() != n
    {
        return Err(PerturbError::LengthMismatch {
            expected: n,
            got: tmin.len(),
            field: "temp_min".to_string(),
        });
    }
    if let Some(tmax) = temp_max
        && tmax.len() != n
    {
        return Err(PerturbError::LengthMismatch {
            expected: n,
            got: tmax.len(),
            field: "temp_max".to_string(),
        });
    }

    // Validate all months in 1..=12
    for &m in month {
        if !(1..=12).contains(&m) {
            return Err(PerturbError::InvalidMonth { month: m });
        }
    }

    // Validate all year indices in 1..=deltas.n_years()
    let ny = deltas.n_years();
    for &y in year {
        if y == 0 || y as usize > ny {
            return Err(PerturbError::YearMismatch {
                expected: ny,
                got: y as usize,
            });
        }
    }

    // Apply deltas
    let mut out_temp = Vec::with_capacity(n);
    let mut out_min = temp_min.map(|_| Vec::with_capacity(n));
    let mut out_max = temp_max.map(|_| Vec::with_capacity(n));

    for i in 0..n {
        let delta = deltas.get(year[i], month[i]);

        // Mean temperature
        if temp[i].is_nan() {
            out_temp.push(f64::NAN);
        } else {
            out_temp.push(temp[i] + delta);
        }

        // Min temperature
        if let (Some(v), Some(tmin)) = (&mut out_min, temp_min) {
            if tmin[i].is_nan() {
                v.push(f64::NAN);
            } else {
                v.push(tmin[i] + delta);
            }
        }

        // Max temperature
        if let (Some(v), Some(tmax)) = (&mut out_max, temp_max) {
            if tmax[i].is_nan() {
                v.push(f64::NAN);
            } else {
                v.push(tmax[i] + delta);
            }
        }
    }

    Ok(TempResult::new(out_temp, out_min, out_max))
}
