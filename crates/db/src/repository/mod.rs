//! Repository functions — one function per database operation.
//!
//! Every function takes the caller's `&mut MySqlConnection` (normally the
//! connection behind an open transaction) and returns a `Result<T, DbError>`.
//! None of them begins, commits or rolls back on its own.

pub mod users;
pub mod squads;
