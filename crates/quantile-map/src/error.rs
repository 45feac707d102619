//! Error types for the zeus-quantile-map crate.

/// Error type for all fallible operations in the zeus-quantile-map crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when precip, months, and years slices differ in length.
    #[error(
        "length mismatch: precip has {precip_len} elements, months has {months_len}, years has {years_len}"
    )]
    LengthMismatch {
        /// Length of the precipitation slice.
        precip_len: usize,
        /// Length of the months slice.
        months_len: usize,
        /// Length of the years slice.
        years_len: usize,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when year indices are not contiguous.
    #[error("non-contiguous year indices (expected max {expected_max}): {reason}")]
    NonContiguousYears {
        /// The expected maximum year index.
        expected_max: u32,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the factor year count does not match the expected count.
    #[error("factor year count mismatch: expected {expected}, got {got}")]
    FactorYearMismatch {
        /// Expected number of factor years.
        expected: usize,
        /// Actual number of factor years.
        got: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a gamma distribution cannot be constructed.
    ///
    /// The `message` field is a `String` (not a statrs error type) because
    /// statrs errors do not implement `Clone`.
    #[error("gamma construction failed (shape={shape}, scale={scale}): {message}")]
    GammaConstruction {
        /// Shape parameter that caused the failure.
        shape: f64,
        /// Scale parameter that caused the failure.
        scale: f64,
        /// Description of the failure.
        message: String,
    },

    /// Returned when no months had sufficient data for gamma fitting.
    #[error("no months had sufficient data for gamma fitting (skipped: {skipped_months:?})")]
    NoFittableMonths {
        /// Calendar months (1-indexed) that were skipped during fitting.
        skipped_months: Vec<u8>,
    },
}
