//! Observed climate data container.

use zeus_calendar::{NoLeapDate, water_year};

use crate::error::IoError;
use crate::validate;

/// Container for observed climate data at a single site.
///
/// Holds precipitation (required), optional temperature extremes, and
/// pre-computed calendar metadata derived from the date sequence.
#[derive(Debug, Clone)]
pub struct ObservedData {
    /// Precipitation time series (required).
    precip: Vec<f64>,
    /// Optional maximum temperature time series.
    temp_max: Option<Vec<f64>>,
    /// Optional minimum temperature time series.
    temp_min: Option<Vec<f64>>,
    /// Date for each time step.
    dates: Vec<NoLeapDate>,
    /// Month of each time step (1..=12).
    months: Vec<u8>,
    /// Water year of each time step.
    water_years: Vec<i32>,
    /// Day-of-year of each time step (1..=365).
    days_of_year: Vec<u16>,
}

impl ObservedData {
    /// Creates a new `ObservedData` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any of the following checks fail:
    /// - Array lengths do not match
    /// - Precipitation contains negative values
    /// - `temp_min > temp_max` at any index
    ///
    /// Returns [`IoError::Calendar`] if water-year computation fails.
    pub fn new(
        precip: Vec<f64>,
        temp_max: Option<Vec<f64>>,
        temp_min: Option<Vec<f64>>,
        dates: Vec<NoLeapDate>,
        start_month: u8,
    ) -> Result<Self, IoError> {
        // Validate lengths.
        validate::validate_lengths(
            precip.len(),
            temp_max.as_ref().map(|v| v.len()),
            temp_min.as_ref().map(|v| v.len()),
            dates.len(),
        )
        .finish()?;

        // Validate precipitation is non-negative.
        validate::validate_precip_non_negative(&precip).finish()?;

        // Validate temperature ordering when both are present.
        if let (Some(tmax), Some(tmin)) = (&temp_max, &temp_min) {
            validate::validate_temp_ordering(tmax, tmin).finish()?;
        }

        // Compute calendar metadata.
        let months: Vec<u8> = dates.iter().map(|d| d.month()).collect();

        let water_years: Vec<i32> = dates
            .iter()
            .map(|d| water_year(d.year(), d.month(), start_month).map_err(IoError::from))
            .collect::<Result<Vec<_>, _>>()?;

        let days_of_year: Vec<u16> = dates.iter().map(|d| d.doy().get()).collect();

        Ok(Self {
            precip,
            temp_max,
            temp_min,
            dates,
            months,
            water_years,
            days_of_year,
        })
    }

    /// Returns the precipitation time series.
    pub fn precip(&self) -> &[f64] {
        &self.precip
    }

    /// Returns the maximum temperature time series, if present.
    pub fn temp_max(&self) -> Option<&[f64]> {
        self.temp_max.as_deref()
    }

    /// Returns the minimum temperature time series, if present.
    pub fn temp_min(&self) -> Option<&[f64]> {
        self.temp_min.as_deref()
    }

    /// Returns the date sequence.
    pub fn dates(&self) -> &[NoLeapDate] {
        &self.dates
    }

    /// Returns the month of each time step.
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    /// Returns the water year of each time step.
    pub fn water_years(&self) -> &[i32] {
        &self.water_years
    }

    /// Returns the day-of-year of each time step.
    pub fn days_of_year(&self) -> &[u16] {
        &self.days_of_year
    }

    /// Returns the number of time steps.
    pub fn len(&self) -> usize {
        self.precip.len()
    }

    /// Returns `true` if the data contains no time steps.
    pub fn is_empty(&self) -> bool {
        self.precip.is_empty()
    }

    /// Consumes self and returns the precipitation vector.
    pub fn into_precip(self) -> Vec<f64> {
        self.precip
    }

    /// Consumes self and returns the optional maximum temperature vector.
    pub fn into_temp_max(self) -> Option<Vec<f64>> {
        self.temp_max
    }

    /// Consumes self and returns the optional minimum temperature vector.
    pub fn into_temp_min(self) -> Option<Vec<f64>> {
        self.temp_min
    }

    /// Consumes self and returns the date vector.
    pub fn into_dates(self) -> Vec<NoLeapDate> {
        self.dates
    }
}
