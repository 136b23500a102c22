use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::notifications::core::notification::Notification;
use crate::modules::notifications::core::ports::NotificationRepository;
use crate::shared::core::ports::StoreError;
use crate::shared::infrastructure::in_memory::store::InMemoryStore;

fn addressed_to(n: &Notification, tenant_id: &str, user_id: Uuid) -> bool {
    n.tenant_id == tenant_id && n.user_id == Some(user_id)
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, StoreError> {
        self.ensure_online()?;
        let notifications = self.notifications.read().await;
        let mut visible: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.is_visible_to(tenant_id, user_id))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(visible.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_unread(&self, tenant_id: &str, user_id: Uuid) -> Result<usize, StoreError> {
        self.ensure_online()?;
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| addressed_to(n, tenant_id, user_id) && !n.is_read)
            .count())
    }

    async fn mark_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut notifications = self.notifications.write().await;
        let Some(found) = notifications
            .iter_mut()
            .find(|n| n.id == notification_id && addressed_to(n, tenant_id, user_id))
        else {
            return Ok(false);
        };
        if !found.is_read {
            found.is_read = true;
            found.read_at = Some(at);
        }
        Ok(true)
    }

    async fn mark_all_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        self.ensure_online()?;
        let mut notifications = self.notifications.write().await;
        let mut updated = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| addressed_to(n, tenant_id, user_id) && !n.is_read)
        {
            n.is_read = true;
            n.read_at = Some(at);
            updated += 1;
        }
        Ok(updated)
    }

    async fn mark_delivered(&self, tenant_id: &str, ids: &[Uuid]) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut notifications = self.notifications.write().await;
        for n in notifications
            .iter_mut()
            .filter(|n| n.tenant_id == tenant_id && ids.contains(&n.id))
        {
            n.delivered = true;
        }
        Ok(())
    }
}
