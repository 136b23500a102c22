use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::time_entry::TimeEntryKind;

#[derive(Debug, Clone, PartialEq)]
pub struct ClockIn {
    pub tenant_id: String,
    pub user_id: Uuid,
    pub start_time: Option<DateTime<Utc>>,
    pub kind: TimeEntryKind,
    pub task_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl ClockIn {
    pub fn new(tenant_id: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id,
            start_time: None,
            kind: TimeEntryKind::Regular,
            task_id: None,
            notes: None,
        }
    }
}
