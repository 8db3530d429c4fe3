//! `engine` crate — the squad creation workflow and its outcome payloads.

pub mod models;
pub mod error;
pub mod workflow;

pub use models::{SquadOutcome, SquadList, MissingUser};
pub use error::EngineError;
pub use workflow::SquadWorkflow;
