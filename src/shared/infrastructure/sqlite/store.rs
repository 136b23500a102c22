// SQLite implementation of every storage port.
//
// Responsibilities
// - Own a single connection behind a std Mutex. Every statement runs on the blocking pool
//   through `run`, so no runtime worker waits on SQLite.
// - Convert between domain types and column values (epoch millis, UUID text, enum text).
// - Treat unreadable stored values as StoreError::Integrity, never as defaults.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::modules::directory::core::ports::{DirectoryTask, DirectoryUser};
use crate::shared::core::ports::StoreError;
use crate::shared::infrastructure::sqlite::schema;

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        schema::bootstrap(&conn).map_err(backend)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `work` against the connection on the blocking thread pool.
    pub(super) async fn run<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|err| StoreError::Backend(format!("connection mutex poisoned: {err}")))?;
            work(&mut guard)
        })
        .await
        .map_err(|err| StoreError::Backend(format!("blocking task failed: {err}")))?
    }

    pub async fn add_user(&self, user: DirectoryUser) -> Result<(), StoreError> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO users (id, tenant_id, full_name) VALUES (?1, ?2, ?3)",
                params![user.id.to_string(), user.tenant_id, user.full_name],
            )
            .map_err(backend)?;
            Ok(())
        })
        .await
    }

    pub async fn add_task(&self, task: DirectoryTask) -> Result<(), StoreError> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO tasks (id, tenant_id, title) VALUES (?1, ?2, ?3)",
                params![task.id.to_string(), task.tenant_id, task.title],
            )
            .map_err(backend)?;
            Ok(())
        })
        .await
    }
}

pub(super) fn backend(err: rusqlite::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

pub(super) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub(super) fn millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(super) fn instant(raw: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(raw)
        .ok_or_else(|| StoreError::Integrity(format!("unreadable timestamp {raw}")))
}

pub(super) fn optional_instant(raw: Option<i64>) -> Result<Option<DateTime<Utc>>, StoreError> {
    raw.map(instant).transpose()
}

pub(super) fn uuid(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::Integrity(format!("unreadable uuid '{raw}'")))
}

pub(super) fn optional_uuid(raw: Option<String>) -> Result<Option<Uuid>, StoreError> {
    raw.as_deref().map(uuid).transpose()
}
