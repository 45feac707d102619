//! Borrowed view over synthetic weather output.

use crate::error::IoError;

/// Borrowed view over a single realisation of synthetic weather output.
///
/// All slices must have the same length. This struct does not own its data;
/// it borrows arrays typically held by the generator.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticWeather<'a> {
    /// Site identifier.
    site: &'a str,
    /// Synthetic precipitation values.
    precip: &'a [f64],
    /// Optional synthetic maximum temperature values.
    temp_max: Option<&'a [f64]>,
    /// Optional synthetic minimum temperature values.
    temp_min: Option<&'a [f64]>,
    /// Month for each time step.
    months: &'a [u8],
    /// Water year for each time step.
    water_years: &'a [i32],
    /// Day-of-year for each time step.
    days_of_year: &'a [u16],
    /// Realisation index.
    realisation: u32,
}

impl<'a> SyntheticWeather<'a> {
    /// Creates a new `SyntheticWeather` view after validating that all present
    /// slices share the same length as `precip`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any slice length differs from
    /// `precip.len()`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        site: &'a str,
        precip: &'a [f64],
        temp_max: Option<&'a [f64]>,
        temp_min: Option<&'a [f64]>,
        months: &'a [u8],
        water_years: &'a [i32],
        days_of_year: &'a [u16],
        realisation: u32,
    ) -> Result<Self, IoError> {
        let expected = precip.len();
        let mut mismatches: Vec<String> = Vec::new();

        if let Some(tmax) = temp_max
            && tmax.len() != expected
        {
            mismatches.push(format!(
                "temp_max length {} != precip length {}",
                tmax.len(),
                expected,
            ));
        }

        if let Some(tmin) = temp_min
            && tmin.len() != expected
        {
            mismatches.push(format!(
                "temp_min length {} != precip length {}",
                tmin.len(),
                expected,
            ));
        }

        if months.len() != expected {
            mismatches.push(format!(
                "months length {} != precip length {}",
                months.len(),
                expected,
            ));
        }

        if water_years.len() != expected {
            mismatches.push(format!(
                "water_years length {} != precip length {}",
                water_years.len(),
                expected,
            ));
        }

        if days_of_year.len() != expected {
            mismatches.push(format!(
                "days_of_year length {} != precip length {}",
                days_of_year.len(),
                expected,
            ));
        }

        if !mismatches.is_empty() {
            return Err(IoError::Validation {
                count: mismatches.len(),
                details: mismatches.join("; "),
            });
        }

        Ok(Self {
            site,
            precip,
            temp_max,
            temp_min,
            months,
            water_years,
            days_of_year,
            realisation,
        })
    }

    /// Returns the site identifier.
    pub fn site(&self) -> &'a str {
        self.site
    }

    /// Returns the synthetic precipitation slice.
    pub fn precip(&self) -> &'a [f64] {
        self.precip
    }

    /// Returns the optional synthetic maximum temperature slice.
    pub fn temp_max(&self) -> Option<&'a [f64]> {
        self.temp_max
    }

    /// Returns the optional synthetic minimum temperature slice.
    pub fn temp_min(&self) -> Option<&'a [f64]> {
        self.temp_min
    }

    /// Returns the month slice for each time step.
    pub fn months(&self) -> &'a [u8] {
        self.months
    }

    /// Returns the water year slice for each time step.
    pub fn water_years(&self) -> &'a [i32] {
        self.water_years
    }

    /// Returns the day-of-year slice for each time step.
    pub fn days_of_year(&self) -> &'a [u16] {
        self.days_of_year
    }

    /// Returns the realisation index.
    pub fn realisation(&self) -> u32 {
        self.realisation
    }

    /// Returns the number of time steps (length of all slices).
    pub fn len(&self) -> usize {
        self.precip.len()
    }

    /// Returns `true` if the weather data has zero time steps.
    pub fn is_empty(&self) -> bool {
        self.precip.is_empty()
    }
}
