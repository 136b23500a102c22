// Shared fixtures for time entry tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::time_entry::{TimeEntry, TimeEntryKind, hours_between};

pub const TENANT_A: &str = "tenant-a";
pub const TENANT_B: &str = "tenant-b";

pub fn user_id() -> Uuid {
    Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001)
}

/// 2025-01-01 at the given wall-clock time, UTC.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    on(1, hour, minute)
}

/// 2025-01-`day` at the given wall-clock time, UTC.
pub fn on(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap()
}

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimeEntry {
                id: Uuid::now_v7(),
                tenant_id: TENANT_A.to_string(),
                user_id: user_id(),
                start_time: at(9, 0),
                end_time: None,
                kind: TimeEntryKind::Regular,
                duration: None,
                is_approved: false,
                notes: None,
                task_id: None,
                shift_id: None,
            },
        }
    }

    pub fn id(mut self, v: Uuid) -> Self {
        self.inner.id = v;
        self
    }

    pub fn tenant_id(mut self, v: impl Into<String>) -> Self {
        self.inner.tenant_id = v.into();
        self
    }

    pub fn user_id(mut self, v: Uuid) -> Self {
        self.inner.user_id = v;
        self
    }

    pub fn start_time(mut self, v: DateTime<Utc>) -> Self {
        self.inner.start_time = v;
        self
    }

    pub fn end_time(mut self, v: DateTime<Utc>) -> Self {
        self.inner.end_time = Some(v);
        self
    }

    /// Closes the entry and stores the matching duration.
    pub fn closed_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.end_time = Some(v);
        self.inner.duration = Some(hours_between(self.inner.start_time, v));
        self
    }

    pub fn kind(mut self, v: TimeEntryKind) -> Self {
        self.inner.kind = v;
        self
    }

    pub fn duration(mut self, v: Option<f64>) -> Self {
        self.inner.duration = v;
        self
    }

    pub fn approved(mut self, v: bool) -> Self {
        self.inner.is_approved = v;
        self
    }

    pub fn notes(mut self, v: impl Into<String>) -> Self {
        self.inner.notes = Some(v.into());
        self
    }

    pub fn task_id(mut self, v: Uuid) -> Self {
        self.inner.task_id = Some(v);
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}
