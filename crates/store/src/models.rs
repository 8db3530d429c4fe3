//! Records shared by every store implementation.

use serde::{Deserialize, Serialize};

/// A squad: a store-assigned identifier plus the user id of its administrator.
///
/// Serialised with the field names clients already consume (`ID`, `Admin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Admin")]
    pub admin: i64,
}
