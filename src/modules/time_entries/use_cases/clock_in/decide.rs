// Pure decision function for clock-in.
//
// Purpose
// - Validate the command against the user's open entry and produce the entry to insert.
//
// Responsibilities
// - Reject when the user already has an open entry in the tenant.
// - Default start_time to now.
// - Never perform input or output.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::errors::TimeEntryError;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::use_cases::clock_in::command::ClockIn;

pub fn decide_clock_in(
    open: Option<&TimeEntry>,
    command: ClockIn,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<TimeEntry, TimeEntryError> {
    if open.is_some() {
        return Err(TimeEntryError::AlreadyClockedIn);
    }
    Ok(TimeEntry {
        id,
        tenant_id: command.tenant_id,
        user_id: command.user_id,
        start_time: command.start_time.unwrap_or(now),
        end_time: None,
        kind: command.kind,
        duration: None,
        is_approved: false,
        notes: command.notes.filter(|n| !n.trim().is_empty()),
        task_id: command.task_id,
        shift_id: None,
    })
}
