// Maintenance handler: fill in durations that closed entries are missing.
//
// Notes
// - Idempotent. The conditional write skips rows that already have a duration.
// - AllTenants is the only cross-tenant path in the ledger and is reserved for superadmins.

use serde::Serialize;
use std::sync::Arc;

use crate::modules::time_entries::core::ports::TimeEntryRepository;
use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillScope {
    AllTenants,
    Tenant(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub scanned: usize,
    pub filled: usize,
}

pub struct BackfillDurationsHandler {
    entries: Arc<dyn TimeEntryRepository>,
}

impl BackfillDurationsHandler {
    pub fn new(entries: Arc<dyn TimeEntryRepository>) -> Self {
        Self { entries }
    }

    pub async fn handle(&self, scope: BackfillScope) -> Result<BackfillReport, ApplicationError> {
        let tenant_filter = match &scope {
            BackfillScope::AllTenants => None,
            BackfillScope::Tenant(tenant_id) => Some(tenant_id.as_str()),
        };
        let candidates = self.entries.list_unmeasured(tenant_filter).await?;

        let mut report = BackfillReport {
            scanned: candidates.len(),
            filled: 0,
        };
        for entry in candidates {
            let Some(hours) = entry.measured_hours() else {
                continue;
            };
            if self
                .entries
                .record_duration(&entry.tenant_id, entry.id, hours)
                .await?
            {
                report.filled += 1;
            }
        }

        tracing::info!(?scope, scanned = report.scanned, filled = report.filled, "durations backfilled");
        Ok(report)
    }
}
