//! In-memory store and pool.
//!
//! Backs the seam traits with plain maps so the crate can be embedded and
//! tested without a live store. The pool counts its release paths and can be
//! told to fail the next N store calls, which is how the retry behavior is
//! exercised.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::config::ScoreRange;
use crate::error::{Result, TermStoreError};
use crate::store::pool::StorePool;
use crate::store::{RangeOrder, StoreConnection};

#[derive(Debug, Default)]
struct Tables {
    sets: AHashMap<String, Vec<String>>,
    // Scored entries are kept sorted by score ascending.
    scored: AHashMap<String, Vec<(String, f64)>>,
}

/// An in-memory set / sorted-set store.
///
/// Cloning is cheap and shares the underlying tables, so a store handle can
/// be kept for seeding data while a pool built over it serves connections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Replace the plain set at `key` with the given members.
    pub fn insert_members<I, S>(&self, key: &str, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members.into_iter().map(Into::into).collect();
        self.tables.write().sets.insert(key.to_string(), members);
    }

    /// Replace the sorted set at `key` with the given scored entries.
    pub fn insert_scored<I, S>(&self, key: &str, entries: I)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, f64)> = entries
            .into_iter()
            .map(|(member, score)| (member.into(), score))
            .collect();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.tables.write().scored.insert(key.to_string(), entries);
    }
}

/// One connection to a [`MemoryStore`].
///
/// Shares the pool's failure budget: while the budget is positive every store
/// call fails with a transient error, simulating a flaky backend.
#[derive(Debug)]
pub struct MemoryConnection {
    store: MemoryStore,
    fail_budget: Arc<AtomicU32>,
}

impl MemoryConnection {
    fn check_failure(&self) -> Result<()> {
        let mut budget = self.fail_budget.load(Ordering::Acquire);
        while budget > 0 {
            match self.fail_budget.compare_exchange(
                budget,
                budget - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Err(TermStoreError::store("injected connection failure")),
                Err(current) => budget = current,
            }
        }
        Ok(())
    }
}

impl StoreConnection for MemoryConnection {
    fn set_members(&mut self, key: &str) -> Result<Vec<String>> {
        self.check_failure()?;
        let tables = self.store.tables.read();
        Ok(tables.sets.get(key).cloned().unwrap_or_default())
    }

    fn range_by_score(
        &mut self,
        key: &str,
        range: ScoreRange,
        order: RangeOrder,
    ) -> Result<Vec<(String, f64)>> {
        self.check_failure()?;
        let tables = self.store.tables.read();
        let mut entries: Vec<(String, f64)> = tables
            .scored
            .get(key)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, score)| range.contains(*score))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if order == RangeOrder::Descending {
            entries.reverse();
        }
        Ok(entries)
    }
}

/// A pool of [`MemoryConnection`]s.
///
/// Connections are stateless handles onto the shared store, so "pooling" here
/// is only lifecycle accounting: acquire mints a handle, release and
/// invalidate count which exit path each handle took.
#[derive(Debug, Default)]
pub struct MemoryPool {
    store: MemoryStore,
    fail_budget: Arc<AtomicU32>,
    acquired: AtomicUsize,
    released: AtomicUsize,
    invalidated: AtomicUsize,
}

impl MemoryPool {
    /// Create a pool over the given store.
    pub fn new(store: MemoryStore) -> Self {
        MemoryPool {
            store,
            ..MemoryPool::default()
        }
    }

    /// Make the next `n` store calls fail with a transient error.
    pub fn fail_next(&self, n: u32) {
        self.fail_budget.store(n, Ordering::Release);
    }

    /// Number of connections handed out so far.
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::Acquire)
    }

    /// Number of connections returned healthy.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::Acquire)
    }

    /// Number of connections discarded as broken.
    pub fn invalidated(&self) -> usize {
        self.invalidated.load(Ordering::Acquire)
    }
}

impl StorePool for MemoryPool {
    fn acquire(&self) -> Result<Box<dyn StoreConnection>> {
        self.acquired.fetch_add(1, Ordering::AcqRel);
        Ok(Box::new(MemoryConnection {
            store: self.store.clone(),
            fail_budget: Arc::clone(&self.fail_budget),
        }))
    }

    fn release(&self, conn: Box<dyn StoreConnection>) {
        self.released.fetch_add(1, Ordering::AcqRel);
        drop(conn);
    }

    fn invalidate(&self, conn: Box<dyn StoreConnection>) {
        self.invalidated.fetch_add(1, Ordering::AcqRel);
        drop(conn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_members() {
        let store = MemoryStore::new();
        store.insert_members("colors", ["red", "green", "blue"]);

        let pool = MemoryPool::new(store);
        let mut conn = pool.acquire().unwrap();
        let mut members = conn.set_members("colors").unwrap();
        members.sort();

        assert_eq!(members, vec!["blue", "green", "red"]);
    }

    #[test]
    fn test_missing_key_is_empty() {
        let pool = MemoryPool::new(MemoryStore::new());
        let mut conn = pool.acquire().unwrap();

        assert!(conn.set_members("nope").unwrap().is_empty());
        assert!(
            conn.range_by_score("nope", ScoreRange::unbounded(), RangeOrder::Ascending)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_range_by_score_ordering() {
        let store = MemoryStore::new();
        store.insert_scored("ranked", [("y", 2.5), ("x", 1.0), ("z", 0.5)]);

        let pool = MemoryPool::new(store);
        let mut conn = pool.acquire().unwrap();

        let ascending = conn
            .range_by_score("ranked", ScoreRange::unbounded(), RangeOrder::Ascending)
            .unwrap();
        assert_eq!(
            ascending,
            vec![
                ("z".to_string(), 0.5),
                ("x".to_string(), 1.0),
                ("y".to_string(), 2.5)
            ]
        );

        let descending = conn
            .range_by_score("ranked", ScoreRange::unbounded(), RangeOrder::Descending)
            .unwrap();
        assert_eq!(descending[0].0, "y");
        assert_eq!(descending[2].0, "z");
    }

    #[test]
    fn test_range_by_score_bounds() {
        let store = MemoryStore::new();
        store.insert_scored("ranked", [("x", 0.5), ("y", 2.0)]);

        let pool = MemoryPool::new(store);
        let mut conn = pool.acquire().unwrap();

        let within = conn
            .range_by_score(
                "ranked",
                ScoreRange::new(0.0, 1.0).unwrap(),
                RangeOrder::Ascending,
            )
            .unwrap();
        assert_eq!(within, vec![("x".to_string(), 0.5)]);
    }

    #[test]
    fn test_failure_injection_budget() {
        let store = MemoryStore::new();
        store.insert_members("colors", ["red"]);

        let pool = MemoryPool::new(store);
        pool.fail_next(2);

        let mut conn = pool.acquire().unwrap();
        assert!(conn.set_members("colors").is_err());
        assert!(conn.set_members("colors").is_err());
        assert_eq!(conn.set_members("colors").unwrap(), vec!["red"]);
    }
}
