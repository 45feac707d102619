//! Corpus file reading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::TextError;
use crate::normalize::normalize;

/// Reads a corpus file and normalizes it into an ordered token sequence.
///
/// # Errors
///
/// Returns [`TextError::Unreadable`] when the file cannot be read.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<String>, TextError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TextError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = normalize(&text);
    debug!(path = %path.display(), n_tokens = tokens.len(), "corpus read");
    Ok(tokens)
}
