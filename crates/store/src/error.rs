//! Store-level error type.

use thiserror::Error;

/// Errors returned by a [`crate::SquadStore`] or [`crate::UnitOfWork`].
///
/// The variant tells the caller which phase of the transaction failed; the
/// message carries the driver's text for logging only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or a transaction could not be opened.
    #[error("store connection error: {0}")]
    Connection(String),

    /// A statement inside an open transaction failed.
    #[error("store query error: {0}")]
    Query(String),

    /// The store refused to commit the transaction.
    #[error("store commit error: {0}")]
    Commit(String),

    /// Rolling the transaction back failed.  Its writes were never committed.
    #[error("store rollback error: {0}")]
    Rollback(String),
}
