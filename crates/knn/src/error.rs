//! Error types for the zeus-knn crate.

/// Error type for all fallible operations in the zeus-knn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KnnError {
    /// Returned when the candidates slice is empty.
    #[error("no candidates provided")]
    EmptyCandidates,

    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when n (number of samples) is zero.
    #[error("n must be >= 1, got {n}")]
    InvalidN {
        /// The invalid n value.
        n: usize,
    },

    /// Returned when epsilon is non-finite or non-positive.
    #[error("epsilon must be finite and positive, got {epsilon}")]
    InvalidEpsilon {
        /// The invalid epsilon value.
        epsilon: f64,
    },

    /// Returned when the target slice length does not match n_vars.
    #[error("target length {target} does not match n_vars {n_vars}")]
    TargetDimensionMismatch {
        /// Length of the target slice.
        target: usize,
        /// Expected number of variables.
        n_vars: usize,
    },

    /// Returned when the weights slice length does not match n_vars.
    #[error("weights length {weights} does not match n_vars {n_vars}")]
    WeightsDimensionMismatch {
        /// Length of the weights slice.
        weights: usize,
        /// Expected number of variables.
        n_vars: usize,
    },

    /// Returned when the candidates slice length is not divisible by n_vars.
    #[error("candidates length {len} is not divisible by n_vars {n_vars}")]
    CandidatesShapeMismatch {
        /// Length of the candidates slice.
        len: usize,
        /// Expected number of variables.
        n_vars: usize,
    },

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },
}
