// Shared harness for the integration suites.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use workforce_time::modules::directory::core::ports::DirectoryUser;
use workforce_time::modules::notifications::adapters::outbound::recording_sink::RecordingNotificationSink;
use workforce_time::modules::time_entries::core::ports::TimeEntryRepository;
use workforce_time::modules::time_entries::core::time_entry::{TimeEntry, TimeEntryKind};
use workforce_time::modules::shifts::core::ports::ShiftRepository;
use workforce_time::modules::notifications::core::ports::NotificationRepository;
use workforce_time::modules::directory::core::ports::{TaskDirectory, UserDirectory};
use workforce_time::shared::core::clock::FixedClock;
use workforce_time::shared::infrastructure::in_memory::store::InMemoryStore;
use workforce_time::shared::infrastructure::sqlite::store::SqliteStore;
use workforce_time::shell::state::{AppState, Ports};

pub const TENANT_A: &str = "tenant-a";
pub const TENANT_B: &str = "tenant-b";
pub const THRESHOLD_HOURS: f64 = 12.0;

pub fn user(n: u128) -> Uuid {
    Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0000 + n)
}

/// 2025-01-`day` at the given wall-clock time, UTC.
pub fn on(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap()
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    on(1, hour, minute)
}

pub struct Harness<S> {
    pub store: Arc<S>,
    pub clock: Arc<FixedClock>,
    pub sink: Arc<RecordingNotificationSink>,
    pub state: AppState,
}

impl<S> Harness<S>
where
    S: TimeEntryRepository
        + ShiftRepository
        + NotificationRepository
        + UserDirectory
        + TaskDirectory
        + 'static,
{
    pub fn with_store(store: S) -> Self {
        let store = Arc::new(store);
        let clock = Arc::new(FixedClock::at(at(9, 0)));
        let sink = Arc::new(RecordingNotificationSink::new());
        let ports = Ports::from_store(store.clone(), sink.clone(), clock.clone());
        let state = AppState::new(&ports, THRESHOLD_HOURS);
        Self {
            store,
            clock,
            sink,
            state,
        }
    }
}

pub fn in_memory() -> Harness<InMemoryStore> {
    Harness::with_store(InMemoryStore::new())
}

pub fn sqlite() -> Harness<SqliteStore> {
    Harness::with_store(SqliteStore::in_memory().unwrap())
}

pub fn directory_user(id: Uuid, tenant_id: &str) -> DirectoryUser {
    DirectoryUser {
        id,
        tenant_id: tenant_id.to_string(),
        full_name: format!("User {id}"),
    }
}

pub fn closed_entry(
    tenant_id: &str,
    user_id: Uuid,
    start_time: DateTime<Utc>,
    hours: f64,
) -> TimeEntry {
    let end_time = start_time + chrono::Duration::milliseconds((hours * 3_600_000.0) as i64);
    TimeEntry {
        id: Uuid::now_v7(),
        tenant_id: tenant_id.to_string(),
        user_id,
        start_time,
        end_time: Some(end_time),
        kind: TimeEntryKind::Regular,
        duration: Some(hours),
        is_approved: false,
        notes: None,
        task_id: None,
        shift_id: None,
    }
}

pub fn open_entry(tenant_id: &str, user_id: Uuid, start_time: DateTime<Utc>) -> TimeEntry {
    TimeEntry {
        end_time: None,
        duration: None,
        ..closed_entry(tenant_id, user_id, start_time, 0.0)
    }
}
