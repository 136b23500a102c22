// Notification inbox of the calling user.
//
// Responsibilities
// - List own and broadcast notifications newest first; returned rows are marked delivered.
// - Count unread, mark one or all as read. Read state applies to notifications addressed to the
//   user; a broadcast has a single row shared by the tenant and stays unread.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::notifications::core::notification::Notification;
use crate::modules::notifications::core::ports::NotificationRepository;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboxPage {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

pub struct InboxHandler {
    notifications: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
}

impl InboxHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications,
            clock,
        }
    }

    pub async fn list(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<InboxPage, ApplicationError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0);
        let mut notifications = self
            .notifications
            .list_for_user(tenant_id, user_id, limit, offset)
            .await?;

        let undelivered: Vec<Uuid> = notifications
            .iter()
            .filter(|n| !n.delivered)
            .map(|n| n.id)
            .collect();
        if !undelivered.is_empty() {
            self.notifications
                .mark_delivered(tenant_id, &undelivered)
                .await?;
            for notification in &mut notifications {
                notification.delivered = true;
            }
        }

        let unread_count = self.notifications.count_unread(tenant_id, user_id).await?;
        Ok(InboxPage {
            notifications,
            unread_count,
        })
    }

    pub async fn unread_count(&self, tenant_id: &str, user_id: Uuid) -> Result<usize, ApplicationError> {
        Ok(self.notifications.count_unread(tenant_id, user_id).await?)
    }

    pub async fn mark_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<(), ApplicationError> {
        let found = self
            .notifications
            .mark_read(tenant_id, user_id, notification_id, self.clock.now())
            .await?;
        if !found {
            return Err(ApplicationError::NotificationNotFound(notification_id));
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, tenant_id: &str, user_id: Uuid) -> Result<usize, ApplicationError> {
        let updated = self
            .notifications
            .mark_all_read(tenant_id, user_id, self.clock.now())
            .await?;
        tracing::info!(%tenant_id, %user_id, updated, "notifications marked read");
        Ok(updated)
    }
}
