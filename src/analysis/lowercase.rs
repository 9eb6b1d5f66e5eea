//! Whitespace-splitting, lowercasing analyzer.
//!
//! A minimal field pipeline: splits on Unicode whitespace and lowercases each
//! token. Hosts with richer analysis chains implement [`Analyzer`] over their
//! own machinery; this one stands in wherever a plain text field is enough.

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// An analyzer that splits on whitespace and lowercases tokens.
#[derive(Clone, Debug, Default)]
pub struct LowercaseAnalyzer;

impl LowercaseAnalyzer {
    /// Create a new lowercase analyzer.
    pub fn new() -> Self {
        LowercaseAnalyzer
    }
}

impl Analyzer for LowercaseAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_whitespace()
            .enumerate()
            .map(|(position, word)| Token::new(word.to_lowercase(), position))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
