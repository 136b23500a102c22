// Shared vocabulary for every storage port.
//
// Purpose
// - One error type that all repositories and directories return, whatever the backend.
//
// Responsibilities
// - Surface constraint conflicts and stale conditional writes so use cases can translate them
//   into domain errors (AlreadyClockedIn, OverlapConflict, NoOpenEntry).
// - Reject unknown persisted enum strings as integrity errors instead of defaulting them.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("constraint '{constraint}' rejected the write")]
    Conflict { constraint: &'static str },

    #[error("{entity} {id} changed before the write was applied")]
    Stale { entity: &'static str, id: Uuid },

    #[error("data integrity: {0}")]
    Integrity(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field} '{value}'")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl From<UnknownVariant> for StoreError {
    fn from(err: UnknownVariant) -> Self {
        StoreError::Integrity(err.to_string())
    }
}
