use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::ports::{OPEN_ENTRY_CONSTRAINT, TimeEntryRepository};
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::shared::core::ports::StoreError;
use crate::shared::core::time_window::TimeWindow;
use crate::shared::infrastructure::in_memory::store::InMemoryStore;

fn by_start(mut entries: Vec<TimeEntry>) -> Vec<TimeEntry> {
    entries.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
    entries
}

impl InMemoryStore {
    async fn select_entries(&self, keep: impl Fn(&TimeEntry) -> bool) -> Vec<TimeEntry> {
        let entries = self.time_entries.read().await;
        by_start(entries.values().filter(|e| keep(e)).cloned().collect())
    }
}

#[async_trait]
impl TimeEntryRepository for InMemoryStore {
    async fn find_open(
        &self,
        tenant_id: &str,
        user_id: Uuid,
    ) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let entries = self.time_entries.read().await;
        Ok(entries
            .values()
            .find(|e| e.tenant_id == tenant_id && e.user_id == user_id && e.is_open())
            .cloned())
    }

    async fn insert(&self, entry: &TimeEntry) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut entries = self.time_entries.write().await;
        if entry.is_open()
            && entries
                .values()
                .any(|e| e.tenant_id == entry.tenant_id && e.user_id == entry.user_id && e.is_open())
        {
            return Err(StoreError::Conflict {
                constraint: OPEN_ENTRY_CONSTRAINT,
            });
        }
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn close(&self, entry: &TimeEntry) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut entries = self.time_entries.write().await;
        match entries.get_mut(&entry.id) {
            Some(stored) if stored.tenant_id == entry.tenant_id && stored.is_open() => {
                stored.end_time = entry.end_time;
                stored.duration = entry.duration;
                stored.kind = entry.kind;
                stored.notes = entry.notes.clone();
                Ok(())
            }
            _ => Err(StoreError::Stale {
                entity: "time entry",
                id: entry.id,
            }),
        }
    }

    async fn last_closed(
        &self,
        tenant_id: &str,
        user_id: Uuid,
    ) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let entries = self.time_entries.read().await;
        Ok(entries
            .values()
            .filter(|e| e.tenant_id == tenant_id && e.user_id == user_id && !e.is_open())
            .max_by_key(|e| e.end_time)
            .cloned())
    }

    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .select_entries(|e| {
                e.tenant_id == tenant_id && e.user_id == user_id && window.contains(e.start_time)
            })
            .await)
    }

    async fn list_for_tenant(
        &self,
        tenant_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .select_entries(|e| e.tenant_id == tenant_id && window.contains(e.start_time))
            .await)
    }

    async fn list_open_started_before(
        &self,
        tenant_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .select_entries(|e| e.tenant_id == tenant_id && e.is_open() && e.start_time < cutoff)
            .await)
    }

    async fn list_overtime(
        &self,
        tenant_id: &str,
        min_hours: f64,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .select_entries(|e| {
                e.tenant_id == tenant_id
                    && !e.is_open()
                    && e.duration.is_some_and(|d| d > min_hours)
            })
            .await)
    }

    async fn list_unmeasured(&self, tenant_id: Option<&str>) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .select_entries(|e| {
                tenant_id.is_none_or(|t| e.tenant_id == t) && !e.is_open() && e.duration.is_none()
            })
            .await)
    }

    async fn record_duration(
        &self,
        tenant_id: &str,
        entry_id: Uuid,
        hours: f64,
    ) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut entries = self.time_entries.write().await;
        match entries.get_mut(&entry_id) {
            Some(stored)
                if stored.tenant_id == tenant_id && !stored.is_open() && stored.duration.is_none() =>
            {
                stored.duration = Some(hours);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
