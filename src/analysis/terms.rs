//! Per-term token production with partial-failure tolerance.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::keyword::KeywordAnalyzer;
use crate::analysis::token::TokenStream;

/// Expands each raw term into zero or more normalized tokens.
///
/// In analyzer mode the field's pipeline decides the expansion; in verbatim
/// mode the raw term is a single token. A term whose analysis fails
/// contributes zero tokens and is logged; the failure never aborts the
/// surrounding query.
pub struct TermTokenizer {
    analyzer: Arc<dyn Analyzer>,
}

impl TermTokenizer {
    /// Create a tokenizer for one compile invocation.
    ///
    /// When `use_field_analyzer` is false the field analyzer is ignored and
    /// every term passes through verbatim.
    pub fn new(field_analyzer: Arc<dyn Analyzer>, use_field_analyzer: bool) -> Self {
        let analyzer: Arc<dyn Analyzer> = if use_field_analyzer {
            field_analyzer
        } else {
            Arc::new(KeywordAnalyzer::new())
        };
        TermTokenizer { analyzer }
    }

    /// The tokens one raw term contributes for the given field.
    ///
    /// Analysis errors are swallowed here at per-term granularity: the
    /// offending term yields an empty stream and processing continues with
    /// the next term.
    pub fn tokens(&self, field: &str, term: &str) -> TokenStream {
        trace!(field, term, analyzer = self.analyzer.name(), "expanding term");
        match self.analyzer.analyze(term) {
            Ok(stream) => stream,
            Err(err) => {
                warn!(field, term, error = %err, "skipping term, analysis failed");
                Box::new(std::iter::empty())
            }
        }
    }

    /// Name of the analyzer in effect.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lowercase::LowercaseAnalyzer;
    use crate::analysis::token::Token;
    use crate::error::{Result, TermStoreError};

    /// An analyzer that always fails, for exercising the skip path.
    struct BrokenAnalyzer;

    impl Analyzer for BrokenAnalyzer {
        fn analyze(&self, _text: &str) -> Result<TokenStream> {
            Err(TermStoreError::analysis("token stream unavailable"))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_analyzer_mode() {
        let tokenizer = TermTokenizer::new(Arc::new(LowercaseAnalyzer::new()), true);
        let tokens: Vec<Token> = tokenizer.tokens("title", "Deep Learning").collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "deep");
        assert_eq!(tokens[1].text, "learning");
    }

    #[test]
    fn test_verbatim_mode_ignores_field_analyzer() {
        let tokenizer = TermTokenizer::new(Arc::new(LowercaseAnalyzer::new()), false);
        let tokens: Vec<Token> = tokenizer.tokens("title", "Deep Learning").collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Deep Learning");
        assert_eq!(tokenizer.analyzer_name(), "keyword");
    }

    #[test]
    fn test_failing_term_yields_no_tokens() {
        let tokenizer = TermTokenizer::new(Arc::new(BrokenAnalyzer), true);
        let tokens: Vec<Token> = tokenizer.tokens("title", "anything").collect();

        assert!(tokens.is_empty());
    }
}
