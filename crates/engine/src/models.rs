//! Outcome payloads of the squad workflow.
//!
//! Both shapes serialise with the capitalised keys existing clients read
//! (`Flag`, `Squads`, `Message`, `SquadID`).

use serde::Serialize;
use store::Squad;

pub const USER_MISSING_MESSAGE: &str = "User doesn't exist";

/// What one workflow invocation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SquadOutcome {
    /// The user existed; a squad was created and this is the full list.
    Created(SquadList),
    /// The user did not exist; nothing was written.
    UserMissing(MissingUser),
}

impl SquadOutcome {
    pub fn created(squads: Vec<Squad>) -> Self {
        Self::Created(SquadList { flag: 1, squads })
    }

    pub fn user_missing() -> Self {
        Self::UserMissing(MissingUser {
            flag: 0,
            message: USER_MISSING_MESSAGE.to_string(),
            squad_id: 0,
        })
    }

    pub fn flag(&self) -> i32 {
        match self {
            Self::Created(list) => list.flag,
            Self::UserMissing(missing) => missing.flag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquadList {
    #[serde(rename = "Flag")]
    pub flag: i32,
    #[serde(rename = "Squads")]
    pub squads: Vec<Squad>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingUser {
    #[serde(rename = "Flag")]
    pub flag: i32,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "SquadID")]
    pub squad_id: u64,
}
