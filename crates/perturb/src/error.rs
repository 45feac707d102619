//! Error types for the zeus-perturb crate.

use zeus_quantile_map::QuantileMapError;

/// Error type for all fallible operations in the zeus-perturb crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PerturbError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when array lengths do not match.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when year counts do not match.
    #[error("year count mismatch: expected {expected}, got {got}")]
    YearMismatch {
        /// Expected number of years.
        expected: usize,
        /// Actual number of years.
        got: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wrapped error from the quantile-map crate.
    #[error(transparent)]
    QuantileMap(#[from] QuantileMapError),

    /// Returned when a Gamma distribution cannot be constructed.
    #[error("gamma construction failed (shape={shape}, scale={scale}): {message}")]
    GammaConstruction {
        /// Shape parameter.
        shape: f64,
        /// Scale parameter.
        scale: f64,
        /// Description of the failure.
        message: String,
    },
}
