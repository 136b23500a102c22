use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Params, Row, params};
use uuid::Uuid;

use crate::modules::time_entries::core::ports::{OPEN_ENTRY_CONSTRAINT, TimeEntryRepository};
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::shared::core::ports::StoreError;
use crate::shared::core::time_window::TimeWindow;
use crate::shared::infrastructure::sqlite::store::{
    SqliteStore, backend, instant, is_unique_violation, millis, optional_instant, optional_uuid,
    uuid,
};

const OLDEST_FIRST: &str = "start_time ASC, id ASC";

struct TimeEntryRow {
    id: String,
    tenant_id: String,
    user_id: String,
    start_time: i64,
    end_time: Option<i64>,
    kind: String,
    duration: Option<f64>,
    is_approved: bool,
    notes: Option<String>,
    task_id: Option<String>,
    shift_id: Option<String>,
}

impl TimeEntryRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            tenant_id: row.get("tenant_id")?,
            user_id: row.get("user_id")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            kind: row.get("kind")?,
            duration: row.get("duration")?,
            is_approved: row.get("is_approved")?,
            notes: row.get("notes")?,
            task_id: row.get("task_id")?,
            shift_id: row.get("shift_id")?,
        })
    }

    fn into_entry(self) -> Result<TimeEntry, StoreError> {
        Ok(TimeEntry {
            id: uuid(&self.id)?,
            tenant_id: self.tenant_id,
            user_id: uuid(&self.user_id)?,
            start_time: instant(self.start_time)?,
            end_time: optional_instant(self.end_time)?,
            kind: self.kind.parse()?,
            duration: self.duration,
            is_approved: self.is_approved,
            notes: self.notes,
            task_id: optional_uuid(self.task_id)?,
            shift_id: optional_uuid(self.shift_id)?,
        })
    }
}

fn select_entries(
    conn: &Connection,
    filter: &str,
    order_by: &str,
    params: impl Params,
) -> Result<Vec<TimeEntry>, StoreError> {
    let sql = format!(
        "SELECT id, tenant_id, user_id, start_time, end_time, kind, duration, is_approved, notes, \
         task_id, shift_id FROM time_entries WHERE {filter} ORDER BY {order_by}"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(backend)?;
    let rows = stmt.query_map(params, TimeEntryRow::read).map_err(backend)?;
    rows.map(|row| row.map_err(backend).and_then(TimeEntryRow::into_entry))
        .collect()
}

#[async_trait]
impl TimeEntryRepository for SqliteStore {
    async fn find_open(
        &self,
        tenant_id: &str,
        user_id: Uuid,
    ) -> Result<Option<TimeEntry>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let found = select_entries(
                conn,
                "tenant_id = ?1 AND user_id = ?2 AND end_time IS NULL",
                OLDEST_FIRST,
                params![tenant_id, user_id.to_string()],
            )?;
            Ok(found.into_iter().next())
        })
        .await
    }

    async fn insert(&self, entry: &TimeEntry) -> Result<(), StoreError> {
        let entry = entry.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO time_entries (id, tenant_id, user_id, start_time, end_time, kind, \
                 duration, is_approved, notes, task_id, shift_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    entry.id.to_string(),
                    entry.tenant_id,
                    entry.user_id.to_string(),
                    millis(entry.start_time),
                    entry.end_time.map(millis),
                    entry.kind.as_str(),
                    entry.duration,
                    entry.is_approved,
                    entry.notes,
                    entry.task_id.map(|id| id.to_string()),
                    entry.shift_id.map(|id| id.to_string()),
                ],
            )
            .map_err(|err| {
                if entry.is_open() && is_unique_violation(&err) {
                    StoreError::Conflict {
                        constraint: OPEN_ENTRY_CONSTRAINT,
                    }
                } else {
                    backend(err)
                }
            })?;
            Ok(())
        })
        .await
    }

    async fn close(&self, entry: &TimeEntry) -> Result<(), StoreError> {
        let entry = entry.clone();
        self.run(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE time_entries SET end_time = ?1, duration = ?2, kind = ?3, notes = ?4 \
                     WHERE id = ?5 AND tenant_id = ?6 AND end_time IS NULL",
                    params![
                        entry.end_time.map(millis),
                        entry.duration,
                        entry.kind.as_str(),
                        entry.notes,
                        entry.id.to_string(),
                        entry.tenant_id,
                    ],
                )
                .map_err(backend)?;
            if changed == 0 {
                return Err(StoreError::Stale {
                    entity: "time entry",
                    id: entry.id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn last_closed(
        &self,
        tenant_id: &str,
        user_id: Uuid,
    ) -> Result<Option<TimeEntry>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let found = select_entries(
                conn,
                "tenant_id = ?1 AND user_id = ?2 AND end_time IS NOT NULL",
                "end_time DESC, id DESC LIMIT 1",
                params![tenant_id, user_id.to_string()],
            )?;
            Ok(found.into_iter().next())
        })
        .await
    }

    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let (tenant_id, window) = (tenant_id.to_string(), *window);
        self.run(move |conn| {
            select_entries(
                conn,
                "tenant_id = ?1 AND user_id = ?2 AND start_time >= ?3 AND start_time < ?4",
                OLDEST_FIRST,
                params![
                    tenant_id,
                    user_id.to_string(),
                    millis(window.start),
                    millis(window.end)
                ],
            )
        })
        .await
    }

    async fn list_for_tenant(
        &self,
        tenant_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let (tenant_id, window) = (tenant_id.to_string(), *window);
        self.run(move |conn| {
            select_entries(
                conn,
                "tenant_id = ?1 AND start_time >= ?2 AND start_time < ?3",
                OLDEST_FIRST,
                params![tenant_id, millis(window.start), millis(window.end)],
            )
        })
        .await
    }

    async fn list_open_started_before(
        &self,
        tenant_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            select_entries(
                conn,
                "tenant_id = ?1 AND end_time IS NULL AND start_time < ?2",
                OLDEST_FIRST,
                params![tenant_id, millis(cutoff)],
            )
        })
        .await
    }

    async fn list_overtime(
        &self,
        tenant_id: &str,
        min_hours: f64,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            select_entries(
                conn,
                "tenant_id = ?1 AND end_time IS NOT NULL AND duration > ?2",
                OLDEST_FIRST,
                params![tenant_id, min_hours],
            )
        })
        .await
    }

    async fn list_unmeasured(&self, tenant_id: Option<&str>) -> Result<Vec<TimeEntry>, StoreError> {
        let tenant_id = tenant_id.map(str::to_string);
        self.run(move |conn| {
            select_entries(
                conn,
                "(?1 IS NULL OR tenant_id = ?1) AND end_time IS NOT NULL AND duration IS NULL",
                OLDEST_FIRST,
                params![tenant_id],
            )
        })
        .await
    }

    async fn record_duration(
        &self,
        tenant_id: &str,
        entry_id: Uuid,
        hours: f64,
    ) -> Result<bool, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE time_entries SET duration = ?1 \
                     WHERE id = ?2 AND tenant_id = ?3 AND end_time IS NOT NULL AND duration IS NULL",
                    params![hours, entry_id.to_string(), tenant_id],
                )
                .map_err(backend)?;
            Ok(changed > 0)
        })
        .await
    }
}
