// Application-level error returned by every handler.
//
// Responsibilities
// - Wrap the per-context rejections and store failures behind one type for the boundary.
// - Expose a stable kind (status category) and code (machine-readable) for each failure.

use thiserror::Error;
use uuid::Uuid;

use crate::modules::reporting::core::errors::ReportError;
use crate::modules::shifts::core::errors::ShiftError;
use crate::modules::time_entries::core::errors::TimeEntryError;
use crate::shared::core::claims::Role;
use crate::shared::core::ports::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Forbidden,
    Unauthenticated,
    Unavailable,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    TimeEntry(#[from] TimeEntryError),

    #[error(transparent)]
    Shift(#[from] ShiftError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("notification {0} not found")]
    NotificationNotFound(Uuid),

    #[error("role '{role}' may not {action}")]
    Forbidden { role: Role, action: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::TimeEntry(err) => err.kind(),
            ApplicationError::Shift(err) => err.kind(),
            ApplicationError::Report(err) => err.kind(),
            ApplicationError::NotificationNotFound(_) => ErrorKind::NotFound,
            ApplicationError::Forbidden { .. } => ErrorKind::Forbidden,
            ApplicationError::Store(StoreError::Backend(_)) => ErrorKind::Unavailable,
            ApplicationError::Store(StoreError::Conflict { .. } | StoreError::Stale { .. }) => {
                ErrorKind::Conflict
            }
            ApplicationError::Store(StoreError::Integrity(_)) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApplicationError::TimeEntry(err) => err.code(),
            ApplicationError::Shift(err) => err.code(),
            ApplicationError::Report(err) => err.code(),
            ApplicationError::NotificationNotFound(_) => "notification_not_found",
            ApplicationError::Forbidden { .. } => "forbidden",
            ApplicationError::Store(StoreError::Backend(_)) => "store_unavailable",
            ApplicationError::Store(StoreError::Conflict { .. }) => "store_conflict",
            ApplicationError::Store(StoreError::Stale { .. }) => "store_stale",
            ApplicationError::Store(StoreError::Integrity(_)) => "store_integrity",
        }
    }
}
