// Clock-in command handler orchestrates the write flow.
//
// Responsibilities
// - Check the optional task reference against the tenant's task directory.
// - Load the user's open entry and call the decider.
// - Insert through the repository; the store constraint turns a lost race into AlreadyClockedIn.

use std::sync::Arc;
use uuid::Uuid;

use crate::modules::directory::core::ports::TaskDirectory;
use crate::modules::time_entries::core::errors::TimeEntryError;
use crate::modules::time_entries::core::ports::{OPEN_ENTRY_CONSTRAINT, TimeEntryRepository};
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::use_cases::clock_in::command::ClockIn;
use crate::modules::time_entries::use_cases::clock_in::decide::decide_clock_in;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::StoreError;

pub struct ClockInHandler {
    entries: Arc<dyn TimeEntryRepository>,
    tasks: Arc<dyn TaskDirectory>,
    clock: Arc<dyn Clock>,
}

impl ClockInHandler {
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

    pub async fn handle(&self, command: ClockIn) -> Result<TimeEntry, ApplicationError> {
        if let Some(task_id) = command.task_id {
            let title = self.tasks.task_title(&command.tenant_id, task_id).await?;
            if title.is_none() {
                return Err(TimeEntryError::TaskNotFound(task_id).into());
            }
        }

        let open = self
            .entries
            .find_open(&command.tenant_id, command.user_id)
            .await?;
        let entry = decide_clock_in(open.as_ref(), command, Uuid::now_v7(), self.clock.now())?;

        match self.entries.insert(&entry).await {
            Ok(()) => {}
            Err(StoreError::Conflict {
                constraint: OPEN_ENTRY_CONSTRAINT,
            }) => return Err(TimeEntryError::AlreadyClockedIn.into()),
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            tenant_id = %entry.tenant_id,
            user_id = %entry.user_id,
            time_entry_id = %entry.id,
            kind = %entry.kind,
            "clocked in"
        );
        Ok(entry)
    }
}
