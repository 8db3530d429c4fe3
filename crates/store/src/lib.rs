//! `store` crate — the unit-of-work capability the squad workflow runs against.
//!
//! The workflow never talks to a database directly.  It asks a [`SquadStore`]
//! for a [`UnitOfWork`], runs its queries through it, and resolves it with
//! `commit` or `rollback`.  The `db` crate provides the MySQL implementation;
//! [`mock::MemoryStore`] is the in-memory fake used by tests.

pub mod error;
pub mod models;
pub mod traits;
pub mod mock;

pub use error::StoreError;
pub use models::Squad;
pub use traits::{SquadStore, UnitOfWork};
