//! Error types for the zeus-markov crate.

/// Error type for all fallible operations in the zeus-markov crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkovError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when there are too few observations.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a threshold specification is invalid.
    #[error("invalid threshold: {reason}")]
    InvalidThreshold {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a spell factor is non-finite or non-positive.
    #[error("invalid spell factor for month {month}: {value} (must be finite and > 0)")]
    InvalidSpellFactor {
        /// 1-indexed month.
        month: u8,
        /// The invalid value.
        value: f64,
    },

    /// Returned when precip and month slices differ in length.
    #[error("length mismatch: precip has {precip_len} elements, months has {months_len}")]
    LengthMismatch {
        /// Length of the precipitation slice.
        precip_len: usize,
        /// Length of the months slice.
        months_len: usize,
    },

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}
