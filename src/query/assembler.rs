//! Clause assembly: fold every term's tokens into one boolean query.

use tracing::{debug, trace};

use crate::analysis::TermTokenizer;
use crate::config::QueryConfig;
use crate::query::boolean::{BooleanTermQuery, TermClause};
use crate::retrieval::RetrievedTermSet;

/// Combines tokenized terms into a single boolean query with clause weights.
///
/// Every token becomes one clause against the configured field, all sharing
/// the configured occurrence. The clause weight is the score-map entry of the
/// originating raw term when one exists, 1.0 otherwise.
pub struct QueryAssembler<'a> {
    config: &'a QueryConfig,
}

impl<'a> QueryAssembler<'a> {
    /// Create an assembler bound to one invocation's configuration.
    pub fn new(config: &'a QueryConfig) -> Self {
        QueryAssembler { config }
    }

    /// Assemble the compiled query.
    pub fn assemble(
        &self,
        terms: &RetrievedTermSet,
        tokenizer: &TermTokenizer,
    ) -> BooleanTermQuery {
        let field = self.config.field();
        let mut query = BooleanTermQuery::new(self.config.occur());

        for term in terms.terms() {
            let boost = terms.score(term).map(|score| score as f32).unwrap_or(1.0);
            for token in tokenizer.tokens(field, term) {
                trace!(field, term = %term, token = %token, "adding clause");
                query.add_clause(TermClause::new(field, token.text).with_boost(boost));
            }
        }

        debug!(field, clauses = query.len(), "assembled boolean query");
        query
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::{Analyzer, LowercaseAnalyzer, TokenStream};
    use crate::config::RetrievalMethod;
    use crate::error::{Result, TermStoreError};
    use crate::query::Occur;
    use crate::retrieval::RetrievalPolicy;
    use crate::store::memory::{MemoryPool, MemoryStore};

    fn fetch(config: &QueryConfig, store: MemoryStore) -> RetrievedTermSet {
        let pool = MemoryPool::new(store);
        RetrievalPolicy::new(config).fetch(&pool).unwrap()
    }

    #[test]
    fn test_verbatim_terms_one_clause_each() {
        let store = MemoryStore::new();
        store.insert_members("colors", ["Red", "Green Blue"]);

        let config = QueryConfig::new("title", "colors", RetrievalMethod::SetMembers)
            .unwrap()
            .with_field_analyzer(false);
        let terms = fetch(&config, store);

        let tokenizer = TermTokenizer::new(Arc::new(LowercaseAnalyzer::new()), false);
        let query = QueryAssembler::new(&config).assemble(&terms, &tokenizer);

        assert_eq!(query.len(), 2);
        assert!(query.clauses().iter().all(|c| c.boost == 1.0));
        assert!(query.clauses().iter().any(|c| c.term == "Green Blue"));
    }

    #[test]
    fn test_analyzed_terms_expand_to_multiple_clauses() {
        let store = MemoryStore::new();
        store.insert_members("phrases", ["Deep Learning"]);

        let config =
            QueryConfig::new("body", "phrases", RetrievalMethod::SetMembers).unwrap();
        let terms = fetch(&config, store);

        let tokenizer = TermTokenizer::new(Arc::new(LowercaseAnalyzer::new()), true);
        let query = QueryAssembler::new(&config).assemble(&terms, &tokenizer);

        let mut clause_terms: Vec<&str> =
            query.clauses().iter().map(|c| c.term.as_str()).collect();
        clause_terms.sort();
        assert_eq!(clause_terms, vec!["deep", "learning"]);
    }

    #[test]
    fn test_score_map_drives_weights() {
        let store = MemoryStore::new();
        store.insert_scored("ranked", [("x", 1.0), ("y", 2.5)]);

        let config =
            QueryConfig::new("title", "ranked", RetrievalMethod::RangeByScoreDesc).unwrap();
        let terms = fetch(&config, store);

        let tokenizer = TermTokenizer::new(Arc::new(LowercaseAnalyzer::new()), true);
        let query = QueryAssembler::new(&config).assemble(&terms, &tokenizer);

        assert_eq!(query.len(), 2);
        let weight_of = |term: &str| {
            query
                .clauses()
                .iter()
                .find(|c| c.term == term)
                .map(|c| c.boost)
        };
        assert_eq!(weight_of("x"), Some(1.0));
        assert_eq!(weight_of("y"), Some(2.5));
    }

    #[test]
    fn test_uniform_occur() {
        let store = MemoryStore::new();
        store.insert_members("colors", ["red", "blue"]);

        let config = QueryConfig::new("title", "colors", RetrievalMethod::SetMembers)
            .unwrap()
            .with_occur(Occur::Must);
        let terms = fetch(&config, store);

        let tokenizer = TermTokenizer::new(Arc::new(LowercaseAnalyzer::new()), true);
        let query = QueryAssembler::new(&config).assemble(&terms, &tokenizer);

        assert_eq!(query.occur(), Occur::Must);
    }

    /// An analyzer that fails on one specific input.
    struct OneBadTerm;

    impl Analyzer for OneBadTerm {
        fn analyze(&self, text: &str) -> Result<TokenStream> {
            if text == "bad" {
                Err(TermStoreError::analysis("cannot analyze"))
            } else {
                LowercaseAnalyzer::new().analyze(text)
            }
        }

        fn name(&self) -> &'static str {
            "one-bad-term"
        }
    }

    #[test]
    fn test_failing_term_skipped_others_kept() {
        let store = MemoryStore::new();
        store.insert_members("mixed", ["good", "bad", "fine"]);

        let config =
            QueryConfig::new("title", "mixed", RetrievalMethod::SetMembers).unwrap();
        let terms = fetch(&config, store);

        let tokenizer = TermTokenizer::new(Arc::new(OneBadTerm), true);
        let query = QueryAssembler::new(&config).assemble(&terms, &tokenizer);

        let mut clause_terms: Vec<&str> =
            query.clauses().iter().map(|c| c.term.as_str()).collect();
        clause_terms.sort();
        assert_eq!(clause_terms, vec!["fine", "good"]);
    }
}
