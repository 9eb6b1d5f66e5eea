//! Keyword analyzer that treats the entire input as a single token.
//!
//! This is the verbatim mode of term expansion: the raw term becomes exactly
//! one token, with no splitting and no normalization. Useful for ID-like or
//! tag-like fields where the stored terms are already in index form.

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A keyword analyzer that treats the entire input as a single token.
#[derive(Clone, Debug, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    /// Create a new keyword analyzer.
    pub fn new() -> Self {
        KeywordAnalyzer
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        if text.is_empty() {
            Ok(Box::new(std::iter::empty()))
        } else {
            Ok(Box::new(std::iter::once(Token::new(text, 0))))
        }
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_analyzer() {
        let analyzer = KeywordAnalyzer::new();
        let tokens: Vec<Token> = analyzer.analyze("Hello World Test").unwrap().collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Hello World Test");
        assert_eq!(tokens[0].position, 0);
    }

    #[test]
    fn test_keyword_analyzer_empty() {
        let analyzer = KeywordAnalyzer::new();
        let tokens: Vec<Token> = analyzer.analyze("").unwrap().collect();

        assert_eq!(tokens.len(), 0);
    }

    #[test]
    fn test_analyzer_name() {
        assert_eq!(KeywordAnalyzer::new().name(), "keyword");
    }
}
