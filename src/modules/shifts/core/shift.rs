// Shift record owned by the scheduler.
//
// Notes
// - Intervals are half-open, so back-to-back shifts do not overlap.
// - Assignments are an explicit join entity carrying acceptance and audit metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftAssignment {
    pub shift_id: Uuid,
    pub user_id: Uuid,
    pub accepted: bool,
    pub assigned_by: Option<Uuid>,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub id: Uuid,
    pub tenant_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub assignees: Vec<ShiftAssignment>,
}

impl Shift {
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time
    }

    pub fn is_assigned(&self, user_id: Uuid) -> bool {
        self.assignees.iter().any(|a| a.user_id == user_id)
    }
}
