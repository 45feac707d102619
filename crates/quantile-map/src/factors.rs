//! Scenario factor matrices for quantile mapping.

use crate::error::QuantileMapError;

/// A validated matrix of monthly scaling factors indexed by year.
///
/// Internally stored as `Vec<[f64; 12]>`, which makes the month-width
/// invariant a compile-time guarantee. Access pattern is always
/// `factors[year_idx][month_idx]`.
#[derive(Debug, Clone)]
pub struct ScenarioFactors {
    inner: Vec<[f64; 12]>,
}

impl ScenarioFactors {
    /// Creates a new `ScenarioFactors` from a vector of monthly factor rows.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::EmptyData`] if `inner` is empty.
    ///
    /// Returns [`QuantileMapError::InvalidConfig`] if any value is not finite
    /// or is not strictly positive.
    pub fn new(inner: Vec<[f64; 12]>) -> Result<Self, QuantileMapError> {
        if inner.is_empty() {
            return Err(QuantileMapError::EmptyData);
        }

        for (year_idx, row) in inner.iter().enumerate() {
            for (month_idx, &val) in row.iter().enumerate() {
                if !val.is_finite() || val <= 0.0 {
                    return Err(QuantileMapError::InvalidConfig {
                        reason: format!(
                            "factor at year_idx={year_idx}, month_idx={month_idx} is {val}; \
                             all factors must be finite and > 0"
                        ),
                    });
                }
            }
        }

        Ok(Self { inner })
    }

    /// Creates factors where every year has the same monthly values.
    ///
    /// This is a convenience constructor that skips validation. The caller is
    /// responsible for ensuring all values in `monthly` are finite and positive.
    pub fn uniform(n_years: usize, monthly: [f64; 12]) -> Self {
        Self {
            inner: vec![monthly; n_years],
        }
    }

    /// Returns the number of years in the factor matrix.
    pub fn n_years(&self) -> usize {
        self.inner.len()
    }

    /// Returns the factor for a given year index and 1-indexed month.
    ///
    /// # Panics
    ///
    /// Panics if `year_idx` is out of range or `month` is not in `1..=12`.
    pub fn get(&self, year_idx: u32, month: u8) -> f64 {
        self.inner[year_idx as usize][month as usize - 1]
    }

    /// Returns the inner data as a slice of `[f64; 12]` rows.
    pub fn as_slice(&self) -> &[[f64; 12]] {
        &self.inner
    }
}
