//! Error types for the zeus-warm crate.

use zeus_arma::ArmaError;
use zeus_wavelet::WaveletError;

/// Error type for all fallible operations in the zeus-warm crate.
///
/// Covers wavelet decomposition errors, ARMA fitting errors, and
/// WARM simulation/filtering failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WarmError {
    /// Wavelet transform error.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),

    /// ARMA model error.
    #[error(transparent)]
    Arma(#[from] ArmaError),

    /// Returned when there are not enough simulations available.
    #[error("insufficient simulations: requested {requested}, available {available}")]
    InsufficientSimulations {
        /// Number of simulations requested.
        requested: usize,
        /// Number of simulations available.
        available: usize,
    },

    /// Returned when the WARM pool filtering fails.
    #[error("filtering failed: {0}")]
    FilteringFailed(String),

    /// Returned when there are no MRA components to simulate.
    #[error("no components to simulate")]
    NoComponentsToSimulate,
}
