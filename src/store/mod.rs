//! External store seam: read operations and pooled connections.
//!
//! The crate never speaks a wire protocol itself. A backend implements
//! [`StoreConnection`] for the three read operations and [`StorePool`]
//! (in [`pool`]) for the acquire/release/invalidate lifecycle; the bundled
//! [`MemoryStore`] provides both for embedding and tests.

pub mod memory;
pub mod pool;

pub use self::memory::{MemoryPool, MemoryStore};
pub use self::pool::{ScopedConnection, StorePool, with_connection};

use crate::config::ScoreRange;
use crate::error::Result;

/// Walk direction for score-range reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOrder {
    /// Walk from min to max.
    Ascending,
    /// Walk from max to min.
    Descending,
}

/// One live connection to the external store.
///
/// Errors from these calls are transient by contract: the connection is
/// presumed broken afterwards and the caller may retry on a fresh one.
pub trait StoreConnection: Send {
    /// All members of the set at `key`. A missing key reads as an empty set.
    fn set_members(&mut self, key: &str) -> Result<Vec<String>>;

    /// Sorted-set elements at `key` whose score lies in the closed `range`,
    /// paired with their scores and walked in `order`.
    fn range_by_score(
        &mut self,
        key: &str,
        range: ScoreRange,
        order: RangeOrder,
    ) -> Result<Vec<(String, f64)>>;
}
