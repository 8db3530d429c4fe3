//! Squad creation workflow.
//!
//! `SquadWorkflow::create_squad` runs one atomic sequence:
//! 1. Opens a unit of work.
//! 2. Counts users with the requested id.
//! 3. If the user exists, inserts a squad administered by them and reads back
//!    every squad.
//! 4. Commits, and only then hands the outcome back for the caller to respond.
//!
//! Any step failure rolls the unit of work back before the stage error is
//! returned.  If the future is dropped or unwinds mid-way, the unit of work is
//! dropped unresolved, which rolls it back as well.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use store::{SquadStore, UnitOfWork};

use crate::{EngineError, SquadOutcome};

/// Stateless orchestrator over a shared [`SquadStore`].
///
/// Construct one per process and share it between requests.
#[derive(Clone)]
pub struct SquadWorkflow {
    store: Arc<dyn SquadStore>,
}

impl SquadWorkflow {
    pub fn new(store: Arc<dyn SquadStore>) -> Self {
        Self { store }
    }

    /// Create a squad administered by `user_id` if that user exists.
    ///
    /// # Errors
    /// Returns the [`EngineError`] variant naming the failing stage.  The
    /// transaction has been rolled back by the time the error is returned.
    #[instrument(skip(self))]
    pub async fn create_squad(&self, user_id: i64) -> Result<SquadOutcome, EngineError> {
        let mut uow = self.store.begin().await.map_err(|e| {
            error!(%e, "Failed to open unit of work");
            EngineError::Connect(e)
        })?;

        let outcome = match Self::check_and_create(&mut *uow, user_id).await {
            Ok(outcome) => outcome,
            Err(engine_err) => {
                error!(%engine_err, "Squad workflow failed, rolling back");
                if let Err(e) = uow.rollback().await {
                    warn!(%e, "Rollback failed");
                }
                return Err(engine_err);
            }
        };

        uow.commit().await.map_err(|e| {
            error!(%e, "Failed to commit squad workflow");
            EngineError::Commit(e)
        })?;

        info!(flag = outcome.flag(), "Squad workflow committed");
        Ok(outcome)
    }

    async fn check_and_create(
        uow: &mut dyn UnitOfWork,
        user_id: i64,
    ) -> Result<SquadOutcome, EngineError> {
        let count = uow
            .count_users_by_id(user_id)
            .await
            .map_err(EngineError::CheckUser)?;

        if count == 0 {
            info!("User does not exist, no squad created");
            return Ok(SquadOutcome::user_missing());
        }

        uow.insert_squad(user_id)
            .await
            .map_err(EngineError::InsertSquad)?;

        let squads = uow.list_squads().await.map_err(EngineError::ListSquads)?;

        Ok(SquadOutcome::created(squads))
    }
}
