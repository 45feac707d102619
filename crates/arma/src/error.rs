//! Error types for the zeus-arma crate.

/// Error type for all fallible operations in the zeus-arma crate.
///
/// This enum covers validation failures, numerical issues, and optimization
/// problems that may occur during ARMA model fitting and simulation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArmaError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than required.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the input data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Returned when the fitted ARMA model violates stationarity constraints.
    #[error("fitted model is non-stationary")]
    NonStationary,

    /// Returned when the optimization algorithm fails to converge.
    #[error("optimisation failed to converge")]
    OptimizationFailed,

    /// Returned when all candidate ARMA models fail to fit.
    #[error("all ARMA candidates failed (max_p={max_p}, max_q={max_q})")]
    AllCandidatesFailed {
        /// Maximum AR order attempted.
        max_p: usize,
        /// Maximum MA order attempted.
        max_q: usize,
    },
}
