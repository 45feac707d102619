//! # calliope-text
//!
//! Read raw corpus files and normalize them into ordered token sequences.
//! Bridges files and free text into the `Vec<String>` token APIs that
//! chain training consumes.

mod corpus;
mod error;
mod normalize;

pub use corpus::read_corpus;
pub use error::TextError;
pub use normalize::normalize;
