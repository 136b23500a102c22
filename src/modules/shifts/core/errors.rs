use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::errors::ErrorKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShiftError {
    #[error("shift start {start} must be before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("shift overlaps an existing shift")]
    OverlapConflict,

    #[error("shift {0} not found")]
    ShiftNotFound(Uuid),

    #[error("none of the given users exist in this tenant")]
    NoValidUsers,
}

impl ShiftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShiftError::InvalidInterval { .. } => ErrorKind::Validation,
            ShiftError::OverlapConflict => ErrorKind::Conflict,
            ShiftError::ShiftNotFound(_) | ShiftError::NoValidUsers => ErrorKind::NotFound,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ShiftError::InvalidInterval { .. } => "invalid_interval",
            ShiftError::OverlapConflict => "overlap_conflict",
            ShiftError::ShiftNotFound(_) => "shift_not_found",
            ShiftError::NoValidUsers => "no_valid_users",
        }
    }
}
