//! Error types for the termstore library.
//!
//! All errors are represented by the [`TermStoreError`] enum. The variants map
//! onto three behavioural classes:
//!
//! - `Config` — rejected at construction, never retried, never contacts the
//!   store.
//! - `Store` — a transient communication failure for a single retrieval try;
//!   the retry loop may absorb it. Exhausting the retry budget converts the
//!   last one into `RetrievalExhausted`, which is fatal to the invocation.
//! - `Analysis` — a per-term tokenization failure; logged and the term is
//!   skipped, the surrounding query is still compiled.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for termstore operations.
#[derive(Error, Debug)]
pub enum TermStoreError {
    /// I/O errors (network, file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid query configuration. Raised at construction, never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transient store-communication failure for one retrieval try.
    #[error("Store error: {0}")]
    Store(String),

    /// Retry budget exhausted while fetching terms from the store.
    #[error("retrieval for key '{key}' failed after {attempts} attempt(s): {source}")]
    RetrievalExhausted {
        /// The store key that was being read.
        key: String,
        /// Total tries made, including the first.
        attempts: u32,
        /// The error from the final try.
        #[source]
        source: Box<TermStoreError>,
    },

    /// Analysis failure for a single term.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TermStoreError.
pub type Result<T> = std::result::Result<T, TermStoreError>;

impl TermStoreError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TermStoreError::Config(msg.into())
    }

    /// Create a new transient store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        TermStoreError::Store(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TermStoreError::Analysis(msg.into())
    }

    /// Whether this error is fatal to the query-parse invocation.
    ///
    /// Transient store errors are absorbed by the retry loop and analysis
    /// errors are swallowed per term, so neither reaches the caller directly.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TermStoreError::Store(_) | TermStoreError::Analysis(_)
        )
    }
}
