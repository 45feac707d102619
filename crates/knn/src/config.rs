//! Configuration for KNN sampling queries.

use crate::error::KnnError;

/// Probability weighting scheme for neighbor selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Sampling {
    /// All k neighbors have equal probability 1/k.
    Uniform,
    /// Rank-based: closest neighbor gets weight 1/1, second 1/2, third 1/3, etc.
    /// Normalized to sum to 1. (Lall & Sharma 1996)
    #[default]
    Rank,
    /// Gaussian kernel: `exp(-dist^2 / (2 * bandwidth^2)) + epsilon`.
    ///
    /// If `bandwidth` is `None`, uses the median of k-nearest distances (adaptive).
    Gaussian {
        /// Optional fixed bandwidth. `None` means adaptive (median of k-nearest distances).
        bandwidth: Option<f64>,
    },
}

/// Configuration for a KNN sampling query.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use zeus_knn::{KnnConfig, Sampling};
///
/// let config = KnnConfig::new(5)
///     .with_n(100)
///     .with_sampling(Sampling::Rank);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct KnnConfig {
    /// Number of nearest neighbors to consider.
    k: usize,
    /// Number of samples to draw (with replacement).
    n: usize,
    /// Probability weighting scheme.
    sampling: Sampling,
    /// Floor for Gaussian mode zero-prevention.
    epsilon: f64,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `n = 1`, `sampling = Rank`, `epsilon = 1e-8`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            n: 1,
            sampling: Sampling::Rank,
            epsilon: 1e-8,
        }
    }

    /// Sets the number of samples to draw.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Sets the probability weighting scheme.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the epsilon floor for Gaussian mode.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the number of nearest neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the number of samples to draw.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the probability weighting scheme.
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// Returns the epsilon floor.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Validates this configuration.
    ///
    /// Returns an error if k < 1, n < 1, or epsilon is non-finite / non-positive.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK { k: self.k });
        }
        if self.n < 1 {
            return Err(KnnError::InvalidN { n: self.n });
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(KnnError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
