// Clock-out command handler orchestrates the write flow.
//
// Responsibilities
// - Load the caller's open entry in the caller's tenant and call the decider.
// - Close it with a conditional write; a concurrent close surfaces as NoOpenEntry.
// - Dispatch overtime intents to the notification sink after the write, best effort.

use std::sync::Arc;

use crate::modules::notifications::core::ports::NotificationSink;
use crate::modules::time_entries::adapters::outbound::intent_dispatch::dispatch_intents;
use crate::modules::time_entries::core::errors::TimeEntryError;
use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::use_cases::clock_out::command::ClockOut;
use crate::modules::time_entries::use_cases::clock_out::decide::decide_clock_out;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::StoreError;

pub struct ClockOutHandler {
    entries: Arc<dyn TimeEntryRepository>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl ClockOutHandler {
    pub fn new(
        entries: Arc<dyn TimeEntryRepository>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries,
            sink,
            clock,
        }
    }

    pub async fn handle(&self, command: ClockOut) -> Result<TimeEntry, ApplicationError> {
        let open = self
            .entries
            .find_open(&command.tenant_id, command.user_id)
            .await?;
        let decision = decide_clock_out(open, command, self.clock.now())?;

        match self.entries.close(&decision.entry).await {
            Ok(()) => {}
            Err(StoreError::Stale { .. }) => return Err(TimeEntryError::NoOpenEntry.into()),
            Err(err) => return Err(err.into()),
        }

        let entry = decision.entry;
        tracing::info!(
            tenant_id = %entry.tenant_id,
            user_id = %entry.user_id,
            time_entry_id = %entry.id,
            duration_hours = entry.duration.unwrap_or_default(),
            kind = %entry.kind,
            "clocked out"
        );
        dispatch_intents(&*self.sink, decision.intents).await;
        Ok(entry)
    }
}
