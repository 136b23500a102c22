// Persistence port for the time entry ledger.
//
// Responsibilities
// - Enforce at most one open entry per (tenant, user) at the store level (insert).
// - Close entries with a conditional write so a concurrent close is detected (close).
// - Serve the range and exception queries used by reporting and the detector.
//
// Notes
// - Every method is tenant scoped except list_unmeasured(None), the cross-tenant maintenance scan.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::shared::core::ports::StoreError;
use crate::shared::core::time_window::TimeWindow;

pub const OPEN_ENTRY_CONSTRAINT: &str = "uq_time_entries_open";

#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    async fn find_open(&self, tenant_id: &str, user_id: Uuid)
    -> Result<Option<TimeEntry>, StoreError>;

    /// Fails with `StoreError::Conflict { constraint: OPEN_ENTRY_CONSTRAINT }` when the entry is
    /// open and the user already has an open entry in the tenant.
    async fn insert(&self, entry: &TimeEntry) -> Result<(), StoreError>;

    /// Writes end_time, duration, kind and notes. Fails with `StoreError::Stale` when the row
    /// is no longer open.
    async fn close(&self, entry: &TimeEntry) -> Result<(), StoreError>;

    async fn last_closed(&self, tenant_id: &str, user_id: Uuid)
    -> Result<Option<TimeEntry>, StoreError>;

    /// Entries whose start_time falls in the window, oldest first.
    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    async fn list_for_tenant(
        &self,
        tenant_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    async fn list_open_started_before(
        &self,
        tenant_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    /// Closed entries with a stored duration strictly greater than `min_hours`.
    async fn list_overtime(
        &self,
        tenant_id: &str,
        min_hours: f64,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    /// Closed entries without a stored duration. `None` scans every tenant.
    async fn list_unmeasured(&self, tenant_id: Option<&str>) -> Result<Vec<TimeEntry>, StoreError>;

    /// Sets the duration only while it is still missing. Returns whether a row changed.
    async fn record_duration(
        &self,
        tenant_id: &str,
        entry_id: Uuid,
        hours: f64,
    ) -> Result<bool, StoreError>;
}
