//! Error types for the calliope-text crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the calliope-text crate.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Returned when a corpus file cannot be read.
    #[error("cannot read corpus {}: {source}", path.display())]
    Unreadable {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}
