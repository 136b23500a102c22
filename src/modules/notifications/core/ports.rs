// Notification ports.
//
// Responsibilities
// - NotificationSink: fire-and-forget hand-off used by producers. Callers log and swallow SinkError.
// - NotificationRepository: durable inbox storage, always scoped by tenant and recipient.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::modules::notifications::core::notification::{NewNotification, Notification};
use crate::shared::core::ports::StoreError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("notification buffer is full")]
    Full,

    #[error("notification channel is closed")]
    Closed,

    #[error("Notification sink offline")]
    Offline,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: NewNotification) -> Result<(), SinkError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError>;

    /// Own and broadcast notifications, newest first.
    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Unread notifications addressed to the user. Broadcasts are not counted.
    async fn count_unread(&self, tenant_id: &str, user_id: Uuid) -> Result<usize, StoreError>;

    /// Returns false when the notification is not addressed to the user.
    async fn mark_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn mark_all_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<usize, StoreError>;

    async fn mark_delivered(&self, tenant_id: &str, ids: &[Uuid]) -> Result<(), StoreError>;
}
