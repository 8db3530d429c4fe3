//! `MemoryStore` — an in-memory test double for `SquadStore`.
//!
//! Units of work are serialised: each one holds the store's lock from `begin`
//! until it is committed, rolled back or dropped, and stages its writes on a
//! private copy of the squad table.  Only `commit` publishes that copy.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

use crate::{Squad, SquadStore, StoreError, UnitOfWork};

/// Where an injected failure fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePoint {
    Begin,
    CountUsers,
    InsertSquad,
    ListSquads,
    Commit,
    Rollback,
}

#[derive(Debug)]
struct MemoryState {
    users: BTreeSet<i64>,
    squads: Vec<Squad>,
    next_id: u64,
}

#[derive(Debug, Default)]
struct Counters {
    begins: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    queries: AtomicUsize,
}

/// Shared in-memory users/squads tables with failure injection and call counters.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<AsyncMutex<MemoryState>>,
    failures: Arc<Mutex<HashSet<FailurePoint>>>,
    counters: Arc<Counters>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store: no users, no squads.
    pub fn new() -> Self {
        Self::with_users(std::iter::empty())
    }

    /// A store pre-populated with the given user ids.
    pub fn with_users(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            state: Arc::new(AsyncMutex::new(MemoryState {
                users: ids.into_iter().collect(),
                squads: Vec::new(),
                next_id: 1,
            })),
            failures: Arc::new(Mutex::new(HashSet::new())),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Add a user after construction.
    pub async fn add_user(&self, id: i64) {
        self.state.lock().await.users.insert(id);
    }

    /// Make every subsequent unit of work fail at `point`, in addition to
    /// any point already set.
    pub fn fail_at(&self, point: FailurePoint) {
        self.failures.lock().unwrap().insert(point);
    }

    /// Stop injecting failures.
    pub fn clear_failure(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Committed squads, in insertion order.
    pub async fn squads(&self) -> Vec<Squad> {
        self.state.lock().await.squads.clone()
    }

    /// Number of committed squads.
    pub async fn squad_count(&self) -> usize {
        self.state.lock().await.squads.len()
    }

    /// Number of successful `begin` calls.
    pub fn begin_count(&self) -> usize {
        self.counters.begins.load(Ordering::SeqCst)
    }

    /// Number of committed units of work.
    pub fn commit_count(&self) -> usize {
        self.counters.commits.load(Ordering::SeqCst)
    }

    /// Number of units of work that were rolled back, explicitly or by drop.
    pub fn rollback_count(&self) -> usize {
        self.counters.rollbacks.load(Ordering::SeqCst)
    }

    /// Number of statements executed across all units of work.
    pub fn query_count(&self) -> usize {
        self.counters.queries.load(Ordering::SeqCst)
    }

    fn injected(&self) -> HashSet<FailurePoint> {
        self.failures.lock().unwrap().clone()
    }
}

#[async_trait]
impl SquadStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let failures = self.injected();
        if failures.contains(&FailurePoint::Begin) {
            return Err(StoreError::Connection("injected begin failure".into()));
        }

        let guard = self.state.clone().lock_owned().await;
        self.counters.begins.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(MemoryUnitOfWork {
            staged: guard.squads.clone(),
            next_id: guard.next_id,
            guard,
            failures,
            counters: self.counters.clone(),
            resolved: false,
        }))
    }
}

/// A unit of work over [`MemoryStore`].
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    staged: Vec<Squad>,
    next_id: u64,
    failures: HashSet<FailurePoint>,
    counters: Arc<Counters>,
    resolved: bool,
}

impl MemoryUnitOfWork {
    fn check(&self, point: FailurePoint) -> Result<(), StoreError> {
        if !self.failures.contains(&point) {
            return Ok(());
        }
        let message = format!("injected {point:?} failure");
        match point {
            FailurePoint::Begin => Err(StoreError::Connection(message)),
            FailurePoint::Commit => Err(StoreError::Commit(message)),
            FailurePoint::Rollback => Err(StoreError::Rollback(message)),
            _ => Err(StoreError::Query(message)),
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn count_users_by_id(&mut self, user_id: i64) -> Result<i64, StoreError> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        self.check(FailurePoint::CountUsers)?;
        Ok(i64::from(self.guard.users.contains(&user_id)))
    }

    async fn insert_squad(&mut self, admin_id: i64) -> Result<(), StoreError> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        self.check(FailurePoint::InsertSquad)?;
        self.staged.push(Squad { id: self.next_id, admin: admin_id });
        self.next_id += 1;
        Ok(())
    }

    async fn list_squads(&mut self) -> Result<Vec<Squad>, StoreError> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        self.check(FailurePoint::ListSquads)?;
        Ok(self.staged.clone())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        self.check(FailurePoint::Commit)?;
        self.guard.squads = std::mem::take(&mut self.staged);
        self.guard.next_id = self.next_id;
        self.resolved = true;
        self.counters.commits.fetch_add(1, Ordering::SeqCst);
        debug!("memory unit of work committed");
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), StoreError> {
        // A failed rollback still discards the staged writes when dropped.
        self.check(FailurePoint::Rollback)?;
        self.resolved = true;
        self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        if !self.resolved {
            self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn committed_writes_are_visible() {
        let store = MemoryStore::with_users([7]);

        let mut uow = store.begin().await.unwrap();
        assert_eq!(uow.count_users_by_id(7).await.unwrap(), 1);
        uow.insert_squad(7).await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(store.squads().await, vec![Squad { id: 1, admin: 7 }]);
        assert_eq!(store.commit_count(), 1);
        assert_eq!(store.rollback_count(), 0);
    }

    #[tokio::test]
    async fn dropped_unit_of_work_discards_writes() {
        let store = MemoryStore::with_users([7]);

        {
            let mut uow = store.begin().await.unwrap();
            uow.insert_squad(7).await.unwrap();
            assert_eq!(uow.list_squads().await.unwrap().len(), 1);
        }

        assert_eq!(store.squad_count().await, 0);
        assert_eq!(store.rollback_count(), 1);
    }

    #[tokio::test]
    async fn ids_keep_increasing_across_units() {
        let store = MemoryStore::with_users([1, 2]);

        for admin in [1, 2] {
            let mut uow = store.begin().await.unwrap();
            uow.insert_squad(admin).await.unwrap();
            uow.commit().await.unwrap();
        }

        let ids: Vec<u64> = store.squads().await.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn injected_failures_map_to_phase() {
        let store = MemoryStore::with_users([1]);

        store.fail_at(FailurePoint::Begin);
        assert!(matches!(store.begin().await, Err(StoreError::Connection(_))));

        store.clear_failure();
        store.fail_at(FailurePoint::InsertSquad);
        let mut uow = store.begin().await.unwrap();
        assert!(matches!(uow.insert_squad(1).await, Err(StoreError::Query(_))));
        uow.rollback().await.unwrap();

        store.clear_failure();
        store.fail_at(FailurePoint::Commit);
        let mut uow = store.begin().await.unwrap();
        uow.insert_squad(1).await.unwrap();
        assert!(matches!(uow.commit().await, Err(StoreError::Commit(_))));

        assert_eq!(store.squad_count().await, 0);
        assert_eq!(store.rollback_count(), 2);
    }

    #[tokio::test]
    async fn failed_rollback_still_discards_writes() {
        let store = MemoryStore::with_users([1]);
        store.fail_at(FailurePoint::Rollback);

        let mut uow = store.begin().await.unwrap();
        uow.insert_squad(1).await.unwrap();
        assert!(matches!(uow.rollback().await, Err(StoreError::Rollback(_))));

        assert_eq!(store.squad_count().await, 0);
        assert_eq!(store.rollback_count(), 1);
    }
}
