use chrono::NaiveDate;
use uuid::Uuid;

/// Side effects requested by a decision, dispatched after the write succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeEntryIntent {
    NotifyOvertime {
        tenant_id: String,
        user_id: Uuid,
        time_entry_id: Uuid,
        duration_hours: f64,
        work_date: NaiveDate,
    },
}
