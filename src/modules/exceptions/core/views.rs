// Compact views returned by the exception detector.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::reporting::core::errors::ReportError;
use crate::modules::time_entries::core::time_entry::{TimeEntry, TimeEntryKind};

pub const DEFAULT_MISSING_CLOCKOUT_THRESHOLD_HOURS: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingClockout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub kind: TimeEntryKind,
}

impl From<&TimeEntry> for MissingClockout {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            start_time: entry.start_time,
            kind: entry.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OvertimeEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionReport {
    pub threshold_hours: f64,
    pub missing_clockouts: Vec<MissingClockout>,
    pub overtime: Vec<OvertimeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingClockoutScan {
    pub threshold_hours: f64,
    pub flagged: Vec<MissingClockout>,
    /// Notifications accepted by the sink.
    pub notified: usize,
}

/// Entries opened before this instant are missing a clock-out.
pub fn missing_clockout_cutoff(
    now: DateTime<Utc>,
    threshold_hours: f64,
) -> Result<DateTime<Utc>, ReportError> {
    if !threshold_hours.is_finite() || threshold_hours <= 0.0 {
        return Err(ReportError::InvalidThreshold(threshold_hours));
    }
    let millis = (threshold_hours * 3_600_000.0).round();
    if millis >= i64::MAX as f64 {
        return Err(ReportError::InvalidThreshold(threshold_hours));
    }
    Duration::try_milliseconds(millis as i64)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or(ReportError::InvalidThreshold(threshold_hours))
}
