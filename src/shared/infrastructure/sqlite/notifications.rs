use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Row, params};
use uuid::Uuid;

use crate::modules::notifications::core::notification::Notification;
use crate::modules::notifications::core::ports::NotificationRepository;
use crate::shared::core::ports::StoreError;
use crate::shared::infrastructure::sqlite::store::{
    SqliteStore, backend, instant, millis, optional_instant, optional_uuid, uuid,
};

struct NotificationRow {
    id: String,
    tenant_id: String,
    user_id: Option<String>,
    task_id: Option<String>,
    kind: String,
    message: String,
    payload: Option<String>,
    severity: String,
    is_read: bool,
    delivered: bool,
    created_at: i64,
    read_at: Option<i64>,
}

impl NotificationRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            tenant_id: row.get("tenant_id")?,
            user_id: row.get("user_id")?,
            task_id: row.get("task_id")?,
            kind: row.get("type")?,
            message: row.get("message")?,
            payload: row.get("payload")?,
            severity: row.get("severity")?,
            is_read: row.get("is_read")?,
            delivered: row.get("delivered")?,
            created_at: row.get("created_at")?,
            read_at: row.get("read_at")?,
        })
    }

    fn into_notification(self) -> Result<Notification, StoreError> {
        let payload = self
            .payload
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|err| StoreError::Integrity(format!("unreadable payload: {err}")))?;
        Ok(Notification {
            id: uuid(&self.id)?,
            tenant_id: self.tenant_id,
            user_id: optional_uuid(self.user_id)?,
            task_id: optional_uuid(self.task_id)?,
            kind: self.kind.parse()?,
            message: self.message,
            payload,
            severity: self.severity.parse()?,
            is_read: self.is_read,
            delivered: self.delivered,
            created_at: instant(self.created_at)?,
            read_at: optional_instant(self.read_at)?,
        })
    }
}

#[async_trait]
impl NotificationRepository for SqliteStore {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError> {
        let payload = notification
            .payload
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| StoreError::Integrity(err.to_string()))?;
        let notification = notification.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO notifications (id, tenant_id, user_id, task_id, type, message, \
                 payload, severity, is_read, delivered, created_at, read_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    notification.id.to_string(),
                    notification.tenant_id,
                    notification.user_id.map(|id| id.to_string()),
                    notification.task_id.map(|id| id.to_string()),
                    notification.kind.as_str(),
                    notification.message,
                    payload,
                    notification.severity.as_str(),
                    notification.is_read,
                    notification.delivered,
                    millis(notification.created_at),
                    notification.read_at.map(millis),
                ],
            )
            .map_err(backend)?;
            Ok(())
        })
        .await
    }

    async fn list_for_user(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT id, tenant_id, user_id, task_id, type, message, payload, severity, \
                     is_read, delivered, created_at, read_at FROM notifications \
                     WHERE tenant_id = ?1 AND (user_id IS NULL OR user_id = ?2) \
                     ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4",
                )
                .map_err(backend)?;
            let rows = stmt
                .query_map(
                    params![tenant_id, user_id.to_string(), limit as i64, offset as i64],
                    NotificationRow::read,
                )
                .map_err(backend)?;
            rows.map(|row| row.map_err(backend).and_then(NotificationRow::into_notification))
                .collect()
        })
        .await
    }

    async fn count_unread(&self, tenant_id: &str, user_id: Uuid) -> Result<usize, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM notifications \
                     WHERE tenant_id = ?1 AND user_id = ?2 AND is_read = 0",
                    params![tenant_id, user_id.to_string()],
                    |row| row.get(0),
                )
                .map_err(backend)?;
            Ok(count as usize)
        })
        .await
    }

    async fn mark_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        notification_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE notifications SET is_read = 1, read_at = COALESCE(read_at, ?4) \
                     WHERE id = ?1 AND tenant_id = ?2 AND user_id = ?3",
                    params![
                        notification_id.to_string(),
                        tenant_id,
                        user_id.to_string(),
                        millis(at)
                    ],
                )
                .map_err(backend)?;
            Ok(changed > 0)
        })
        .await
    }

    async fn mark_all_read(
        &self,
        tenant_id: &str,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            conn.execute(
                "UPDATE notifications SET is_read = 1, read_at = ?3 \
                 WHERE tenant_id = ?1 AND user_id = ?2 AND is_read = 0",
                params![tenant_id, user_id.to_string(), millis(at)],
            )
            .map_err(backend)
        })
        .await
    }

    async fn mark_delivered(&self, tenant_id: &str, ids: &[Uuid]) -> Result<(), StoreError> {
        let (tenant_id, ids) = (tenant_id.to_string(), ids.to_vec());
        self.run(move |conn| {
            let mut stmt = conn
                .prepare_cached(
                    "UPDATE notifications SET delivered = 1 WHERE id = ?1 AND tenant_id = ?2",
                )
                .map_err(backend)?;
            for id in &ids {
                stmt.execute(params![id.to_string(), tenant_id])
                    .map_err(backend)?;
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod sqlite_notifications_tests {
    use super::*;
    use crate::modules::notifications::core::notification::{
        NewNotification, NotificationKind, Severity,
    };
    use crate::test_support::fixtures::time_entries::{TENANT_A, at, user_id};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn before_each() -> SqliteStore {
        SqliteStore::in_memory().unwrap()
    }

    fn addressed(user: Option<Uuid>, created_at: DateTime<Utc>) -> Notification {
        let mut new = NewNotification::to_user(
            TENANT_A,
            user_id(),
            NotificationKind::OvertimeDetected,
            "Overtime detected",
        )
        .with_severity(Severity::Warning)
        .with_payload(json!({ "duration_hours": 9.5 }));
        new.user_id = user;
        new.stamp(Uuid::now_v7(), created_at)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_back_own_and_broadcast_rows(before_each: SqliteStore) {
        let store = before_each;
        let own = addressed(Some(user_id()), at(9, 0));
        let broadcast = addressed(None, at(10, 0));
        let foreign = addressed(Some(Uuid::now_v7()), at(11, 0));
        for n in [&own, &broadcast, &foreign] {
            store.insert(n).await.unwrap();
        }

        let listed = store.list_for_user(TENANT_A, user_id(), 20, 0).await.unwrap();
        let paged = store.list_for_user(TENANT_A, user_id(), 1, 1).await.unwrap();

        assert_eq!(listed, vec![broadcast, own.clone()]);
        assert_eq!(paged, vec![own]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_track_read_state_on_addressed_rows(before_each: SqliteStore) {
        let store = before_each;
        let first = addressed(Some(user_id()), at(9, 0));
        let second = addressed(Some(user_id()), at(9, 30));
        let broadcast = addressed(None, at(10, 0));
        for n in [&first, &second, &broadcast] {
            store.insert(n).await.unwrap();
        }

        assert_eq!(store.count_unread(TENANT_A, user_id()).await, Ok(2));
        assert_eq!(
            store.mark_read(TENANT_A, user_id(), first.id, at(11, 0)).await,
            Ok(true)
        );
        assert_eq!(
            store.mark_read(TENANT_A, user_id(), broadcast.id, at(11, 0)).await,
            Ok(false)
        );
        assert_eq!(store.mark_all_read(TENANT_A, user_id(), at(12, 0)).await, Ok(1));
        assert_eq!(store.count_unread(TENANT_A, user_id()).await, Ok(0));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_mark_rows_delivered(before_each: SqliteStore) {
        let store = before_each;
        let own = addressed(Some(user_id()), at(9, 0));
        store.insert(&own).await.unwrap();

        store.mark_delivered(TENANT_A, &[own.id]).await.unwrap();

        let listed = store.list_for_user(TENANT_A, user_id(), 20, 0).await.unwrap();
        assert!(listed[0].delivered);
    }
}
