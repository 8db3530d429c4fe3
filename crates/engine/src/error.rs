//! Engine-level error types.

use store::StoreError;
use thiserror::Error;

/// A failed squad workflow, tagged with the stage that failed.
///
/// The wrapped [`StoreError`] is for logs.  Clients only ever see
/// [`EngineError::public_message`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No transaction could be opened.
    #[error("connect failed: {0}")]
    Connect(StoreError),

    #[error("user existence check failed: {0}")]
    CheckUser(StoreError),

    #[error("squad insert failed: {0}")]
    InsertSquad(StoreError),

    #[error("squad listing failed: {0}")]
    ListSquads(StoreError),

    #[error("commit failed: {0}")]
    Commit(StoreError),
}

impl EngineError {
    /// The fixed, stage-specific text returned to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Connect(_) => "Failed to connect to database",
            Self::CheckUser(_) => "Failed to check user existence",
            Self::InsertSquad(_) => "Failed to create squad",
            Self::ListSquads(_) => "Failed to fetch squads",
            Self::Commit(_) => "Failed to commit transaction",
        }
    }
}
