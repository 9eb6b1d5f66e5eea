//! Core analyzer trait definition.
//!
//! The [`Analyzer`] trait is the seam between this crate and the host's text
//! analysis pipeline: the host hands the analyzer configured for the target
//! field, and each retrieved term is pushed through it at query time.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Requires `Send + Sync` so a field analyzer can be shared across the many
/// request threads compiling queries concurrently.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// An empty stream is a valid outcome (e.g., the input was entirely
    /// filtered out); an error means the term that produced this text cannot
    /// contribute clauses.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;
}
