//! Evaluation configuration.

/// Configuration for the evaluation pipeline.
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    precip_threshold: f64,
    precip_var: String,
    temp_max_var: String,
    temp_min_var: String,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            precip_threshold: 0.01,
            precip_var: "precip".to_string(),
            temp_max_var: "temp_max".to_string(),
            temp_min_var: "temp_min".to_string(),
        }
    }
}

impl EvaluateConfig {
    /// Set the precipitation threshold (mm) for wet/dry classification.
    pub fn with_precip_threshold(mut self, threshold: f64) -> Self {
        self.precip_threshold = threshold;
        self
    }

    /// Set the precipitation variable name.
    pub fn with_precip_var(mut self, name: impl Into<String>) -> Self {
        self.precip_var = name.into();
        self
    }

    /// Set the max temperature variable name.
    pub fn with_temp_max_var(mut self, name: impl Into<String>) -> Self {
        self.temp_max_var = name.into();
        self
    }

    /// Set the min temperature variable name.
    pub fn with_temp_min_var(mut self, name: impl Into<String>) -> Self {
        self.temp_min_var = name.into();
        self
    }

    /// Returns the precipitation threshold.
    pub fn precip_threshold(&self) -> f64 {
        self.precip_threshold
    }

    /// Returns the precipitation variable name.
    pub fn precip_var(&self) -> &str {
        &self.precip_var
    }

    /// Returns the max temperature variable name.
    pub fn temp_max_var(&self) -> &str {
        &self.temp_max_var
    }

    /// Returns the min temperature variable name.
    pub fn temp_min_var(&self) -> &str {
        &self.temp_min_var
    }
}
