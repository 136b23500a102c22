// Time entry record owned by the ledger.
//
// Lifecycle
// - OPEN (end_time is None) -> CLOSED (end_time set). CLOSED is terminal.
// - duration is stored in hours once closed; legacy rows may miss it until backfilled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::core::ports::UnknownVariant;

pub const OVERTIME_THRESHOLD_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEntryKind {
    #[default]
    Regular,
    Overtime,
    Pto,
}

impl TimeEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeEntryKind::Regular => "regular",
            TimeEntryKind::Overtime => "overtime",
            TimeEntryKind::Pto => "pto",
        }
    }
}

impl FromStr for TimeEntryKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "regular" => Ok(TimeEntryKind::Regular),
            "overtime" => Ok(TimeEntryKind::Overtime),
            "pto" => Ok(TimeEntryKind::Pto),
            _ => Err(UnknownVariant {
                field: "time entry kind",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimeEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hours between two instants, millisecond precision.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub tenant_id: String,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub kind: TimeEntryKind,
    pub duration: Option<f64>,
    pub is_approved: bool,
    pub notes: Option<String>,
    pub task_id: Option<Uuid>,
    pub shift_id: Option<Uuid>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn elapsed_hours(&self, now: DateTime<Utc>) -> f64 {
        hours_between(self.start_time, now).max(0.0)
    }

    /// Stored duration, or the one implied by the interval when it was never persisted.
    pub fn measured_hours(&self) -> Option<f64> {
        self.duration
            .or_else(|| self.end_time.map(|end| hours_between(self.start_time, end)))
    }
}
