//! Configuration for Markov chain estimation and simulation.

use crate::error::MarkovError;

/// Specifies how a threshold is determined.
#[derive(Debug, Clone, Copy)]
pub enum ThresholdSpec {
    /// A fixed precipitation value (e.g. 0.3 mm).
    Fixed(f64),
    /// A quantile resolved per-month from the baseline data (e.g. 0.8).
    Quantile(f64),
}

/// Configuration for Markov chain estimation.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use zeus_markov::MarkovConfig;
///
/// let config = MarkovConfig::new()
///     .with_dirichlet_alpha(0.5);
/// ```
#[derive(Clone, Debug)]
pub struct MarkovConfig {
    wet_spec: ThresholdSpec,
    extreme_spec: ThresholdSpec,
    dirichlet_alpha: f64,
    dry_spell_factors: [f64; 12],
    wet_spell_factors: [f64; 12],
}

impl MarkovConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `wet_spec = Fixed(0.3)`, `extreme_spec = Quantile(0.8)`,
    /// `dirichlet_alpha = 1.0`, all spell factors = 1.0.
    pub fn new() -> Self {
        Self {
            wet_spec: ThresholdSpec::Fixed(0.3),
            extreme_spec: ThresholdSpec::Quantile(0.8),
            dirichlet_alpha: 1.0,
            dry_spell_factors: [1.0; 12],
            wet_spell_factors: [1.0; 12],
        }
    }

    /// Sets the wet/dry threshold specification.
    pub fn with_wet_spec(mut self, spec: ThresholdSpec) -> Self {
        self.wet_spec = spec;
        self
    }

    /// Sets the wet/extreme threshold specification.
    pub fn with_extreme_spec(mut self, spec: ThresholdSpec) -> Self {
        self.extreme_spec = spec;
        self
    }

    /// Sets the Dirichlet smoothing parameter.
    pub fn with_dirichlet_alpha(mut self, alpha: f64) -> Self {
        self.dirichlet_alpha = alpha;
        self
    }

    /// Sets the monthly dry-spell persistence factors.
    pub fn with_dry_spell_factors(mut self, factors: [f64; 12]) -> Self {
        self.dry_spell_factors = factors;
        self
    }

    /// Sets the monthly wet-spell persistence factors.
    pub fn with_wet_spell_factors(mut self, factors: [f64; 12]) -> Self {
        self.wet_spell_factors = factors;
        self
    }

    // --- Accessors ---

    /// Returns the wet/dry threshold specification.
    pub fn wet_spec(&self) -> ThresholdSpec {
        self.wet_spec
    }

    /// Returns the wet/extreme threshold specification.
    pub fn extreme_spec(&self) -> ThresholdSpec {
        self.extreme_spec
    }

    /// Returns the Dirichlet smoothing parameter.
    pub fn dirichlet_alpha(&self) -> f64 {
        self.dirichlet_alpha
    }

    /// Returns the monthly dry-spell persistence factors.
    pub fn dry_spell_factors(&self) -> &[f64; 12] {
        &self.dry_spell_factors
    }

    /// Returns the monthly wet-spell persistence factors.
    pub fn wet_spell_factors(&self) -> &[f64; 12] {
        &self.wet_spell_factors
    }

    /// Validates this configuration.
    ///
    /// Checks that alpha is finite and positive, spell factors are finite and
    /// positive, `Fixed` values are finite and non-negative, and `Quantile`
    /// values are in the open interval (0, 1).
    pub fn validate(&self) -> Result<(), MarkovError> {
        // Alpha
        if !self.dirichlet_alpha.is_finite() || self.dirichlet_alpha <= 0.0 {
            return Err(MarkovError::InvalidThreshold {
                reason: format!(
                    "dirichlet_alpha must be finite and positive, got {}",
                    self.dirichlet_alpha
                ),
            });
        }

        // Threshold specs
        Self::validate_spec(self.wet_spec, "wet_spec")?;
        Self::validate_spec(self.extreme_spec, "extreme_spec")?;

        // Spell factors
        for (i, &f) in self.dry_spell_factors.iter().enumerate() {
            if !f.is_finite() || f <= 0.0 {
                return Err(MarkovError::InvalidSpellFactor {
                    month: (i + 1) as u8,
                    value: f,
                });
            }
        }
        for (i, &f) in self.wet_spell_factors.iter().enumerate() {
            if !f.is_finite() || f <= 0.0 {
                return Err(MarkovError::InvalidSpellFactor {
                    month: (i + 1) as u8,
                    value: f,
                });
            }
        }

        Ok(())
    }

    fn validate_spec(spec: ThresholdSpec, name: &str) -> Result<(), MarkovError> {
        match spec {
            ThresholdSpec::Fixed(v) => {
                if !v.is_finite() || v < 0.0 {
                    return Err(MarkovError::InvalidThreshold {
                        reason: format!(
                            "{name}: Fixed value must be finite and non-negative, got {v}"
                        ),
                    });
                }
            }
            ThresholdSpec::Quantile(q) => {
                if !q.is_finite() || q <= 0.0 || q >= 1.0 {
                    return Err(MarkovError::InvalidThreshold {
                        reason: format!("{name}: Quantile must be in (0, 1), got {q}"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for MarkovConfig {
    fn default() -> Self {
        Self::new()
    }
}
