// Current status query handler.
//
// Responsibilities
// - Report whether the user is clocked in, with elapsed hours computed live.
// - Report the end time of the user's most recent closed entry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::modules::time_entries::core::time_entry::TimeEntryKind;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenEntryStatus {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub elapsed_hours: f64,
    pub kind: TimeEntryKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentStatus {
    pub is_clocked_in: bool,
    pub current_entry: Option<OpenEntryStatus>,
    pub last_clock_out: Option<DateTime<Utc>>,
}

pub struct CurrentStatusHandler {
    entries: Arc<dyn TimeEntryRepository>,
    clock: Arc<dyn Clock>,
}

impl CurrentStatusHandler {
    pub fn new(entries: Arc<dyn TimeEntryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { entries, clock }
    }

    pub async fn handle(
        &self,
        tenant_id: &str,
        user_id: Uuid,
    ) -> Result<CurrentStatus, ApplicationError> {
        tracing::debug!(%tenant_id, %user_id, "current status");
        let now = self.clock.now();
        let open = self.entries.find_open(tenant_id, user_id).await?;
        let last_closed = self.entries.last_closed(tenant_id, user_id).await?;

        Ok(CurrentStatus {
            is_clocked_in: open.is_some(),
            current_entry: open.map(|entry| OpenEntryStatus {
                id: entry.id,
                start_time: entry.start_time,
                elapsed_hours: entry.elapsed_hours(now),
                kind: entry.kind,
            }),
            last_clock_out: last_closed.and_then(|entry| entry.end_time),
        })
    }
}
