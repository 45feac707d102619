//! Result types for the perturbation pipeline.

/// Records which pipeline modules were applied.
#[derive(Debug, Clone)]
pub struct ModulesApplied {
    /// Whether temperature adjustment was applied.
    pub temperature: bool,
    /// Whether quantile mapping was applied.
    pub quantile_map: bool,
    /// Whether occurrence adjustment was applied.
    pub occurrence: bool,
    /// Whether safety rails were applied.
    pub safety_rails: bool,
}

/// Result of the temperature adjustment step.
#[derive(Debug, Clone)]
pub struct TempResult {
    /// Adjusted mean temperature.
    temp: Vec<f64>,
    /// Adjusted minimum temperature, if provided.
    temp_min: Option<Vec<f64>>,
    /// Adjusted maximum temperature, if provided.
    temp_max: Option<Vec<f64>>,
}

impl TempResult {
    /// Creates a new temperature result.
    pub fn new(temp: Vec<f64>, temp_min: Option<Vec<f64>>, temp_max: Option<Vec<f64>>) -> Self {
        Self {
            temp,
            temp_min,
            temp_max,
        }
    }

    /// Returns the adjusted mean temperature.
    pub fn temp(&self) -> &[f64] {
        &self.temp
    }

    /// Consumes self and returns the owned mean temperature vector.
    pub fn into_temp(self) -> Vec<f64> {
        self.temp
    }

    /// Returns the adjusted minimum temperature, if available.
    pub fn temp_min(&self) -> Option<&[f64]> {
        self.temp_min.as_deref()
    }

    /// Returns the adjusted maximum temperature, if available.
    pub fn temp_max(&self) -> Option<&[f64]> {
        self.temp_max.as_deref()
    }
}

/// Result of the occurrence adjustment step.
#[derive(Debug, Clone)]
pub struct OccurrenceResult {
    /// Adjusted precipitation after occurrence changes.
    precip: Vec<f64>,
    /// Number of wet days added across all months/years.
    days_added: usize,
    /// Number of wet days removed across all months/years.
    days_removed: usize,
}

impl OccurrenceResult {
    /// Creates a new occurrence result.
    pub fn new(precip: Vec<f64>, days_added: usize, days_removed: usize) -> Self {
        Self {
            precip,
            days_added,
            days_removed,
        }
    }

    /// Returns the adjusted precipitation.
    pub fn precip(&self) -> &[f64] {
        &self.precip
    }

    /// Consumes self and returns the owned precipitation vector.
    pub fn into_precip(self) -> Vec<f64> {
        self.precip
    }

    /// Returns the number of wet days added.
    pub fn days_added(&self) -> usize {
        self.days_added
    }

    /// Returns the number of wet days removed.
    pub fn days_removed(&self) -> usize {
        self.days_removed
    }
}

/// The complete output of the perturbation pipeline.
#[derive(Debug, Clone)]
pub struct PerturbResult {
    /// Final adjusted precipitation.
    precip: Vec<f64>,
    /// Adjusted mean temperature.
    temp: Vec<f64>,
    /// Adjusted minimum temperature, if provided.
    temp_min: Option<Vec<f64>>,
    /// Adjusted maximum temperature, if provided.
    temp_max: Option<Vec<f64>>,
    /// Which modules were applied.
    modules_applied: ModulesApplied,
}

impl PerturbResult {
    /// Creates a new perturbation result.
    pub fn new(
        precip: Vec<f64>,
        temp: Vec<f64>,
        temp_min: Option<Vec<f64>>,
        temp_max: Option<Vec<f64>>,
        modules_applied: ModulesApplied,
    ) -> Self {
        Self {
            precip,
            temp,
            temp_min,
            temp_max,
            modules_applied,
        }
    }

    /// Returns the final adjusted precipitation.
    pub fn precip(&self) -> &[f64] {
        &self.precip
    }

    /// Consumes self and returns the owned precipitation vector.
    pub fn into_precip(self) -> Vec<f64> {
        self.precip
    }

    /// Returns the adjusted mean temperature.
    pub fn temp(&self) -> &[f64] {
        &self.temp
    }

    /// Returns the adjusted minimum temperature, if available.
    pub fn temp_min(&self) -> Option<&[f64]> {
        self.temp_min.as_deref()
    }

    /// Returns the adjusted maximum temperature, if available.
    pub fn temp_max(&self) -> Option<&[f64]> {
        self.temp_max.as_deref()
    }

    /// Returns information about which modules were applied.
    pub fn modules_applied(&self) -> &ModulesApplied {
        &self.modules_applied
    }
}
