//! # Error Types
//!
//! Errors raised while building retrieval queries and loading catalogs.
//! An empty retrieval result has no variant here:
//! "nothing found" is a valid, empty list.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the trivia core.
#[derive(Error, Debug)]
pub enum TriviaError {
    /// Neither `country` nor `countries` carried a usable value.
    #[error("Country parameter is required")]
    MissingCountry,

    /// A catalog entry is missing a required field.
    #[error("invalid trivia item at index {index}: {reason}")]
    InvalidItem {
        /// Position of the entry in the catalog document.
        index: usize,
        /// Which field was rejected.
        reason: String,
    },

    /// The catalog document could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}
