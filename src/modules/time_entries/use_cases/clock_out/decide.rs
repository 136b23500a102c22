// Pure decision function for clock-out.
//
// Purpose
// - Close the user's open entry and decide whether it became overtime.
//
// Responsibilities
// - Reject when there is no open entry, or when end_time is before start_time.
// - Compute duration in hours and reclassify regular entries above the overtime threshold.
// - Append notes instead of overwriting them.
// - Request an overtime notification as an intent. Never perform input or output.

use chrono::{DateTime, Utc};

use crate::modules::time_entries::core::errors::TimeEntryError;
use crate::modules::time_entries::core::intents::TimeEntryIntent;
use crate::modules::time_entries::core::time_entry::{
    OVERTIME_THRESHOLD_HOURS, TimeEntry, TimeEntryKind, hours_between,
};
use crate::modules::time_entries::use_cases::clock_out::command::ClockOut;

#[derive(Debug, Clone, PartialEq)]
pub struct ClockOutDecision {
    pub entry: TimeEntry,
    pub intents: Vec<TimeEntryIntent>,
}

pub fn decide_clock_out(
    open: Option<TimeEntry>,
    command: ClockOut,
    now: DateTime<Utc>,
) -> Result<ClockOutDecision, TimeEntryError> {
    let Some(mut entry) = open.filter(TimeEntry::is_open) else {
        return Err(TimeEntryError::NoOpenEntry);
    };

    let end_time = command.end_time.unwrap_or(now);
    if end_time < entry.start_time {
        return Err(TimeEntryError::EndBeforeStart {
            start: entry.start_time,
            end: end_time,
        });
    }

    let duration = hours_between(entry.start_time, end_time);
    entry.end_time = Some(end_time);
    entry.duration = Some(duration);
    entry.notes = append_notes(entry.notes.take(), command.notes);

    let mut intents = Vec::new();
    if duration > OVERTIME_THRESHOLD_HOURS && entry.kind == TimeEntryKind::Regular {
        entry.kind = TimeEntryKind::Overtime;
        intents.push(TimeEntryIntent::NotifyOvertime {
            tenant_id: entry.tenant_id.clone(),
            user_id: entry.user_id,
            time_entry_id: entry.id,
            duration_hours: duration,
            work_date: entry.start_time.date_naive(),
        });
    }

    Ok(ClockOutDecision { entry, intents })
}

fn append_notes(existing: Option<String>, extra: Option<String>) -> Option<String> {
    let extra = extra.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    match (existing, extra) {
        (Some(existing), Some(extra)) if !existing.trim().is_empty() => {
            Some(format!("{} {}", existing.trim_end(), extra))
        }
        (_, Some(extra)) => Some(extra),
        (existing, None) => existing,
    }
}
