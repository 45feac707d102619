//! Error types for the zeus-wavelet crate.

/// Error type for all fallible operations in the zeus-wavelet crate.
///
/// Covers validation failures, numerical issues, and transform problems
/// that may occur during wavelet analysis.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when the input series is shorter than the minimum required length.
    #[error("series too short: got {len} observations, need at least {min}")]
    SeriesTooShort {
        /// Number of observations provided.
        len: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the requested decomposition level exceeds the maximum.
    #[error("level too high: requested {requested}, max for length {len} is {max}")]
    LevelTooHigh {
        /// Level that was requested.
        requested: usize,
        /// Maximum feasible level.
        max: usize,
        /// Length of the input series.
        len: usize,
    },

    /// Returned when the MRA reconstruction error exceeds tolerance.
    #[error("reconstruction error {0} exceeds tolerance")]
    ReconstructionError(f64),

    /// Returned when an unsupported wavelet filter name is provided.
    #[error("unsupported wavelet filter: {0}")]
    UnsupportedFilter(String),

    /// Returned when the MODWT computation fails.
    #[error("MODWT failed: {0}")]
    ModwtFailed(String),

    /// Returned when the MRA computation fails.
    #[error("MRA failed: {0}")]
    MraFailed(String),
}
