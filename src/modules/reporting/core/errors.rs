use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::shared::core::errors::ErrorKind;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReportError {
    #[error("start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("'{0}' is not a YYYY-MM-DD date or an RFC 3339 timestamp")]
    InvalidDate(String),

    #[error("threshold must be a positive number of hours, got {0}")]
    InvalidThreshold(f64),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReportError::InvalidRange { .. } => "invalid_range",
            ReportError::InvalidDate(_) => "invalid_date",
            ReportError::InvalidThreshold(_) => "invalid_threshold",
        }
    }
}
