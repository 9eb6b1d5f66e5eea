//! Top-level compile entry point.

use std::sync::Arc;

use tracing::debug;

use crate::analysis::{Analyzer, TermTokenizer};
use crate::config::QueryConfig;
use crate::error::Result;
use crate::query::assembler::QueryAssembler;
use crate::query::boolean::BooleanTermQuery;
use crate::retrieval::RetrievalPolicy;
use crate::store::pool::StorePool;

/// Compile one store-backed boolean query.
///
/// Runs the full pipeline for a single parse invocation: retrieval (with
/// bounded retry), per-term tokenization, clause assembly. Configuration and
/// exhausted-retry errors propagate as fatal; per-term analysis failures are
/// logged and skipped.
///
/// The whole call is synchronous and blocking on the calling thread. The
/// pool is the only shared state; everything else is private to this call.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use termstore::analysis::LowercaseAnalyzer;
/// use termstore::config::{QueryConfig, RetrievalMethod};
/// use termstore::query::compile;
/// use termstore::store::{MemoryPool, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.insert_members("colors", ["red", "blue"]);
/// let pool = MemoryPool::new(store);
///
/// let config = QueryConfig::new("title", "colors", RetrievalMethod::SetMembers).unwrap();
/// let query = compile(&config, &pool, Arc::new(LowercaseAnalyzer::new())).unwrap();
///
/// assert_eq!(query.len(), 2);
/// ```
pub fn compile(
    config: &QueryConfig,
    pool: &dyn StorePool,
    field_analyzer: Arc<dyn Analyzer>,
) -> Result<BooleanTermQuery> {
    let terms = RetrievalPolicy::new(config).fetch(pool)?;
    debug!(
        field = config.field(),
        terms = terms.len(),
        "preparing query for retrieved terms"
    );

    let tokenizer = TermTokenizer::new(field_analyzer, config.use_field_analyzer());
    Ok(QueryAssembler::new(config).assemble(&terms, &tokenizer))
}
