//! `MySqlStore` — the `sqlx` backend for the unit-of-work traits.

use async_trait::async_trait;
use sqlx::{MySql, Transaction};
use tracing::{debug, error};

use store::{Squad, SquadStore, StoreError, UnitOfWork};

use crate::pool::{create_pool, DbPool};
use crate::repository::{squads, users};
use crate::{DbConfig, DbError};

/// A [`SquadStore`] over a MySQL pool.  Cheap to clone.
#[derive(Clone)]
pub struct MySqlStore {
    pool: DbPool,
}

impl MySqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Build the store and its lazily-connected pool from `config`.
    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(create_pool(config))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SquadStore for MySqlStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let tx = self.pool.begin().await.map_err(|e| {
            error!(%e, "Failed to open transaction");
            StoreError::Connection(e.to_string())
        })?;
        Ok(Box::new(MySqlUnitOfWork { tx }))
    }
}

/// One MySQL transaction.
///
/// Dropping it without `commit` lets `sqlx` roll the transaction back.
pub struct MySqlUnitOfWork {
    tx: Transaction<'static, MySql>,
}

fn query_error(e: DbError) -> StoreError {
    StoreError::Query(e.to_string())
}

#[async_trait]
impl UnitOfWork for MySqlUnitOfWork {
    async fn count_users_by_id(&mut self, user_id: i64) -> Result<i64, StoreError> {
        users::count_users_by_id(&mut self.tx, user_id)
            .await
            .map_err(query_error)
    }

    async fn insert_squad(&mut self, admin_id: i64) -> Result<(), StoreError> {
        let id = squads::insert_squad(&mut self.tx, admin_id)
            .await
            .map_err(query_error)?;
        debug!(squad_id = id, admin_id, "Inserted squad");
        Ok(())
    }

    async fn list_squads(&mut self) -> Result<Vec<Squad>, StoreError> {
        let rows = squads::list_squads(&mut self.tx).await.map_err(query_error)?;
        Ok(rows.into_iter().map(Squad::from).collect())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::Commit(e.to_string()))
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| StoreError::Rollback(e.to_string()))
    }
}
