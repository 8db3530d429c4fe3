//! The `SquadStore` / `UnitOfWork` traits — the contract every backend must fulfil.

use async_trait::async_trait;

use crate::{Squad, StoreError};

/// Hands out units of work.  One store is shared by every request.
#[async_trait]
pub trait SquadStore: Send + Sync {
    /// Open a new transaction.
    ///
    /// Fails with [`StoreError::Connection`] when the backend is unreachable.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError>;
}

/// A single open transaction.
///
/// Every operation runs inside the transaction that was opened by
/// [`SquadStore::begin`]; none of them opens its own.  Dropping a unit of work
/// without calling [`UnitOfWork::commit`] must discard all of its writes.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Number of users whose id equals `user_id`.
    async fn count_users_by_id(&mut self, user_id: i64) -> Result<i64, StoreError>;

    /// Insert a squad administered by `admin_id`.  The store assigns the id.
    async fn insert_squad(&mut self, admin_id: i64) -> Result<(), StoreError>;

    /// Every squad row, in the store's default order.
    async fn list_squads(&mut self) -> Result<Vec<Squad>, StoreError>;

    /// Make every write of this unit of work visible.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    /// Discard every write of this unit of work.
    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
