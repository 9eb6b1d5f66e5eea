//! Term retrieval from the external store, with bounded retry.
//!
//! One parse invocation makes at most `max_retries + 1` tries. A try fails
//! only on a store-communication error; an empty result is a terminal success
//! and is never retried. Each failed try discards its connection as broken
//! and the next try acquires a fresh one. Exhausting the budget converts the
//! final transient error into a fatal one for the caller.

use ahash::AHashMap;

use tracing::{debug, trace};

use crate::config::{QueryConfig, RetrievalMethod};
use crate::error::{Result, TermStoreError};
use crate::store::pool::{StorePool, with_connection};
use crate::store::{RangeOrder, StoreConnection};

/// The terms fetched from the store for one parse invocation.
///
/// Owned by the invocation that fetched it and consumed immediately by
/// tokenization; never shared or mutated after retrieval completes. The
/// score map is present only for score-range methods.
#[derive(Debug, Clone, Default)]
pub struct RetrievedTermSet {
    terms: Vec<String>,
    scores: Option<AHashMap<String, f64>>,
}

impl RetrievedTermSet {
    /// Build from plain set members. No score map.
    fn members(members: Vec<String>) -> Self {
        let mut seen = ahash::AHashSet::with_capacity(members.len());
        let terms = members
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .collect();
        RetrievedTermSet {
            terms,
            scores: None,
        }
    }

    /// Build from scored entries, keeping the walk order of the terms.
    fn scored(entries: Vec<(String, f64)>) -> Self {
        let mut terms = Vec::with_capacity(entries.len());
        let mut scores = AHashMap::with_capacity(entries.len());
        for (term, score) in entries {
            if scores.insert(term.clone(), score).is_none() {
                terms.push(term);
            }
        }
        RetrievedTermSet {
            terms,
            scores: Some(scores),
        }
    }

    /// The distinct retrieved terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the retrieval produced no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The stored score for a term, when a non-empty score map exists.
    pub fn score(&self, term: &str) -> Option<f64> {
        self.scores.as_ref().and_then(|scores| scores.get(term)).copied()
    }

    /// Whether a score map was built for this retrieval.
    pub fn has_scores(&self) -> bool {
        self.scores.as_ref().is_some_and(|scores| !scores.is_empty())
    }
}

/// Fetches a term set according to configuration, retrying transient store
/// failures up to the configured budget.
pub struct RetrievalPolicy<'a> {
    config: &'a QueryConfig,
}

impl<'a> RetrievalPolicy<'a> {
    /// Create a policy bound to one invocation's configuration.
    pub fn new(config: &'a QueryConfig) -> Self {
        RetrievalPolicy { config }
    }

    /// Fetch the term set, retrying on transient failures.
    pub fn fetch(&self, pool: &dyn StorePool) -> Result<RetrievedTermSet> {
        let key = self.config.key();
        let budget = self.config.max_retries().saturating_add(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match with_connection(pool, |conn| self.fetch_once(conn)) {
                Ok(result) => {
                    debug!(key, terms = result.len(), attempt, "fetched terms from store");
                    return Ok(result);
                }
                Err(err) if attempt < budget => {
                    debug!(key, attempt, error = %err, "error fetching from store, retrying");
                }
                Err(err) => {
                    return Err(TermStoreError::RetrievalExhausted {
                        key: key.to_string(),
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
            }
        }
    }

    /// One try against one connection.
    fn fetch_once(&self, conn: &mut dyn StoreConnection) -> Result<RetrievedTermSet> {
        let key = self.config.key();
        match self.config.method() {
            RetrievalMethod::SetMembers => {
                trace!(key, "fetching set members");
                Ok(RetrievedTermSet::members(conn.set_members(key)?))
            }
            RetrievalMethod::RangeByScoreDesc => {
                let range = self.config.range();
                trace!(key, min = range.min, max = range.max, "fetching descending score range");
                Ok(RetrievedTermSet::scored(conn.range_by_score(
                    key,
                    range,
                    RangeOrder::Descending,
                )?))
            }
            RetrievalMethod::RangeByScoreAsc => {
                let range = self.config.range();
                trace!(key, min = range.min, max = range.max, "fetching ascending score range");
                Ok(RetrievedTermSet::scored(conn.range_by_score(
                    key,
                    range,
                    RangeOrder::Ascending,
                )?))
            }
        }
    }
}
