// In memory implementation of every storage port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep one map per aggregate behind a tokio RwLock.
// - Run every check-then-write under a single write guard, which gives the single-writer
//   guarantee the open-entry and shift-overlap rules rely on.
// - Simulate an unreachable backend with toggle_offline.

use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::directory::core::ports::{DirectoryTask, DirectoryUser};
use crate::modules::notifications::core::notification::Notification;
use crate::modules::shifts::core::shift::Shift;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::shared::core::ports::StoreError;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(super) time_entries: RwLock<HashMap<Uuid, TimeEntry>>,
    pub(super) shifts: RwLock<HashMap<Uuid, Shift>>,
    pub(super) notifications: RwLock<Vec<Notification>>,
    pub(super) users: RwLock<HashMap<Uuid, DirectoryUser>>,
    pub(super) tasks: RwLock<HashMap<Uuid, DirectoryTask>>,
    is_offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub(super) fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Store offline".into()));
        }
        Ok(())
    }

    pub async fn add_user(&self, user: DirectoryUser) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn add_task(&self, task: DirectoryTask) {
        self.tasks.write().await.insert(task.id, task);
    }

    pub async fn notification_count(&self) -> usize {
        self.notifications.read().await.len()
    }
}
