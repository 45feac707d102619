//! Error types for the calliope-chain crate.

/// Error type for all fallible operations in the calliope-chain crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Returned when a traversal is requested while the probability table
    /// is out of sync with the recorded observations.
    #[error("chain is not primed: training began without a closing prime()")]
    NotPrimed,

    /// Returned when a transition is recorded out of the `End` sentinel.
    #[error("the End sentinel cannot be a transition source")]
    EndAsSource,

    /// Returned when a transition is recorded into the `Begin` sentinel.
    #[error("the Begin sentinel cannot be a transition destination")]
    BeginAsDestination,
}
