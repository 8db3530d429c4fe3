//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models.  The `users` table is only ever counted,
//! so it has no row struct.

use sqlx::FromRow;
use store::Squad;

/// A persisted squad row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct SquadRow {
    pub id: u64,
    /// User id of the squad administrator.
    pub admin: i64,
}

impl From<SquadRow> for Squad {
    fn from(row: SquadRow) -> Self {
        Squad { id: row.id, admin: row.admin }
    }
}
