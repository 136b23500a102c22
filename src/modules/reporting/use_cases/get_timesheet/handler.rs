// Timesheet query handler.
//
// Responsibilities
// - Resolve the date window and list the user's entries that start inside it.
// - Fill in durations of closed rows that never stored one.
// - Attach the task title of each entry, or "N/A".

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::directory::core::ports::TaskDirectory;
use crate::modules::reporting::core::report_window::resolve_window;
use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::modules::time_entries::core::time_entry::TimeEntryKind;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;

pub const NO_TASK_TITLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct GetTimesheet {
    pub tenant_id: String,
    pub user_id: Uuid,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetRow {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub kind: TimeEntryKind,
    pub is_approved: bool,
    pub notes: Option<String>,
    pub task_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timesheet {
    pub user_id: Uuid,
    pub start: DateTime<Utc>,
    /// Exclusive.
    pub end: DateTime<Utc>,
    pub entries: Vec<TimesheetRow>,
    pub total_hours: f64,
}

pub struct GetTimesheetHandler {
    entries: Arc<dyn TimeEntryRepository>,
    tasks: Arc<dyn TaskDirectory>,
    clock: Arc<dyn Clock>,
}

impl GetTimesheetHandler {
    pub fn new(
        entries: Arc<dyn TimeEntryRepository>,
        tasks: Arc<dyn TaskDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries,
            tasks,
            clock,
        }
    }

    pub async fn handle(&self, query: GetTimesheet) -> Result<Timesheet, ApplicationError> {
        let window = resolve_window(query.start, query.end, self.clock.now())?;
        tracing::debug!(tenant_id = %query.tenant_id, user_id = %query.user_id, ?window, "timesheet");
        let entries = self
            .entries
            .list_for_user(&query.tenant_id, query.user_id, &window)
            .await?;

        let mut titles: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let task_title = match entry.task_id {
                Some(task_id) => {
                    if !titles.contains_key(&task_id) {
                        let title = self.tasks.task_title(&query.tenant_id, task_id).await?;
                        titles.insert(task_id, title);
                    }
                    titles.get(&task_id).cloned().flatten()
                }
                None => None,
            };
            rows.push(TimesheetRow {
                id: entry.id,
                start_time: entry.start_time,
                end_time: entry.end_time,
                duration: entry.measured_hours(),
                kind: entry.kind,
                is_approved: entry.is_approved,
                notes: entry.notes,
                task_title: task_title.unwrap_or_else(|| NO_TASK_TITLE.to_string()),
            });
        }

        let total_hours = rows.iter().filter_map(|row| row.duration).sum();
        Ok(Timesheet {
            user_id: query.user_id,
            start: window.start,
            end: window.end,
            entries: rows,
            total_hours,
        })
    }
}
