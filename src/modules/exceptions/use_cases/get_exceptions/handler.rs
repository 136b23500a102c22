// Read-only exception listing: missing clock-outs and overtime entries of a tenant.

use std::sync::Arc;

use crate::modules::exceptions::core::views::{
    ExceptionReport, MissingClockout, OvertimeEntry, missing_clockout_cutoff,
};
use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::modules::time_entries::core::time_entry::OVERTIME_THRESHOLD_HOURS;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;

pub struct GetExceptionsHandler {
    entries: Arc<dyn TimeEntryRepository>,
    clock: Arc<dyn Clock>,
    default_threshold_hours: f64,
}

impl GetExceptionsHandler {
    pub fn new(
        entries: Arc<dyn TimeEntryRepository>,
        clock: Arc<dyn Clock>,
        default_threshold_hours: f64,
    ) -> Self {
        Self {
            entries,
            clock,
            default_threshold_hours,
        }
    }

    pub async fn handle(
        &self,
        tenant_id: &str,
        threshold_hours: Option<f64>,
    ) -> Result<ExceptionReport, ApplicationError> {
        let threshold_hours = threshold_hours.unwrap_or(self.default_threshold_hours);
        let cutoff = missing_clockout_cutoff(self.clock.now(), threshold_hours)?;
        tracing::debug!(%tenant_id, threshold_hours, "exceptions");

        let missing = self
            .entries
            .list_open_started_before(tenant_id, cutoff)
            .await?;
        let overtime = self
            .entries
            .list_overtime(tenant_id, OVERTIME_THRESHOLD_HOURS)
            .await?;

        Ok(ExceptionReport {
            threshold_hours,
            missing_clockouts: missing.iter().map(MissingClockout::from).collect(),
            overtime: overtime
                .into_iter()
                .filter_map(|entry| {
                    entry.duration.map(|duration| OvertimeEntry {
                        id: entry.id,
                        user_id: entry.user_id,
                        start_time: entry.start_time,
                        duration,
                    })
                })
                .collect(),
        })
    }
}
