//! Pooled-connection contract and scoped acquisition.
//!
//! A connection is exclusively owned between acquire and release. The release
//! path is an explicit outcome tag: healthy connections return to the pool
//! for reuse, broken ones are discarded. [`ScopedConnection`] guarantees that
//! exactly one of the two happens on every exit path, including early returns
//! and panics.

use tracing::trace;

use crate::error::Result;
use crate::store::StoreConnection;

/// A thread-safe pool of store connections.
pub trait StorePool: Send + Sync {
    /// Acquire a connection for exclusive use.
    fn acquire(&self) -> Result<Box<dyn StoreConnection>>;

    /// Return a healthy connection for reuse.
    fn release(&self, conn: Box<dyn StoreConnection>);

    /// Discard a broken connection. It must never be handed out again.
    fn invalidate(&self, conn: Box<dyn StoreConnection>);
}

/// A pooled connection with an explicit success/broken outcome.
///
/// On drop the connection goes back to the pool through `release` if
/// [`succeed`](Self::succeed) was called, through `invalidate` otherwise.
/// The pessimistic default means a panic or an early `?` return discards the
/// connection instead of pooling a possibly broken instance.
pub struct ScopedConnection<'a> {
    pool: &'a dyn StorePool,
    conn: Option<Box<dyn StoreConnection>>,
    healthy: bool,
}

impl<'a> ScopedConnection<'a> {
    /// Acquire a connection from the pool.
    pub fn acquire(pool: &'a dyn StorePool) -> Result<Self> {
        let conn = pool.acquire()?;
        trace!("acquired store connection");
        Ok(ScopedConnection {
            pool,
            conn: Some(conn),
            healthy: false,
        })
    }

    /// Access the held connection.
    pub fn conn(&mut self) -> &mut dyn StoreConnection {
        // Invariant: conn is Some from acquire until drop.
        self.conn
            .as_mut()
            .expect("connection present until drop")
            .as_mut()
    }

    /// Mark the connection healthy so drop releases it for reuse.
    pub fn succeed(&mut self) {
        self.healthy = true;
    }
}

impl Drop for ScopedConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if self.healthy {
                trace!("releasing store connection");
                self.pool.release(conn);
            } else {
                trace!("invalidating store connection");
                self.pool.invalidate(conn);
            }
        }
    }
}

/// Run one operation on a freshly acquired connection.
///
/// The connection is released for reuse when the operation succeeds and
/// invalidated when it fails.
pub fn with_connection<R>(
    pool: &dyn StorePool,
    op: impl FnOnce(&mut dyn StoreConnection) -> Result<R>,
) -> Result<R> {
    let mut scoped = ScopedConnection::acquire(pool)?;
    let result = op(scoped.conn());
    if result.is_ok() {
        scoped.succeed();
    }
    result
}
