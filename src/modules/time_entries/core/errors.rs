use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::errors::ErrorKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeEntryError {
    #[error("user is already clocked in")]
    AlreadyClockedIn,

    #[error("no open time entry found")]
    NoOpenEntry,

    #[error("end time {end} is before start time {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("task {0} not found")]
    TaskNotFound(Uuid),
}

impl TimeEntryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimeEntryError::AlreadyClockedIn => ErrorKind::Conflict,
            TimeEntryError::NoOpenEntry | TimeEntryError::TaskNotFound(_) => ErrorKind::NotFound,
            TimeEntryError::EndBeforeStart { .. } => ErrorKind::Validation,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TimeEntryError::AlreadyClockedIn => "already_clocked_in",
            TimeEntryError::NoOpenEntry => "no_open_entry",
            TimeEntryError::EndBeforeStart { .. } => "end_before_start",
            TimeEntryError::TaskNotFound(_) => "task_not_found",
        }
    }
}
