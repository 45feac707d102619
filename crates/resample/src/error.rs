//! Error types for the zeus-resample crate.

/// Error type for all fallible operations in the zeus-resample crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResampleError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when there are too few observed years.
    #[error("insufficient observed data: got {n} years, need at least {min}")]
    InsufficientData {
        /// Number of observed years.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("non-finite value in {field}")]
    NonFiniteInput {
        /// Name of the field containing the non-finite value.
        field: &'static str,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no candidates found after all fallbacks.
    #[error("no candidates for day {day} in month {month}")]
    NoCandidates {
        /// Day index in the year (0-based).
        day: usize,
        /// Calendar month (1-indexed).
        month: u8,
    },

    /// Returned when a month value is invalid.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Markov error.
    #[error(transparent)]
    Markov(#[from] zeus_markov::MarkovError),

    /// KNN error.
    #[error(transparent)]
    Knn(#[from] zeus_knn::KnnError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] zeus_calendar::CalendarError),
}
