//! `db` crate — MySQL persistence for squads.
//!
//! Provides configuration, a lazily-connected pool, typed row structs, one
//! repository function per SQL statement, and [`MySqlStore`], the `sqlx`
//! implementation of the `store` crate's unit-of-work traits.
//! No business logic lives here.

pub mod config;
pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod unit_of_work;

pub use config::DbConfig;
pub use error::{ConfigError, DbError};
pub use pool::DbPool;
pub use unit_of_work::MySqlStore;
