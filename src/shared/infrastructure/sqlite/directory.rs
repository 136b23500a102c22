use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use crate::modules::directory::core::ports::{TaskDirectory, UserDirectory};
use crate::shared::core::ports::StoreError;
use crate::shared::infrastructure::sqlite::store::{SqliteStore, backend};

#[async_trait]
impl UserDirectory for SqliteStore {
    async fn resolve_users(
        &self,
        tenant_id: &str,
        user_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, StoreError> {
        let (tenant_id, user_ids) = (tenant_id.to_string(), user_ids.to_vec());
        self.run(move |conn| {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT EXISTS (SELECT 1 FROM users \
                     WHERE id = ?1 AND tenant_id = ?2 AND is_active = 1)",
                )
                .map_err(backend)?;

            let mut resolved = Vec::with_capacity(user_ids.len());
            for id in user_ids {
                let exists: bool = stmt
                    .query_row(params![id.to_string(), tenant_id], |row| row.get(0))
                    .map_err(backend)?;
                if exists {
                    resolved.push(id);
                }
            }
            Ok(resolved)
        })
        .await
    }
}

#[async_trait]
impl TaskDirectory for SqliteStore {
    async fn task_title(
        &self,
        tenant_id: &str,
        task_id: Uuid,
    ) -> Result<Option<String>, StoreError> {
        let tenant_id = tenant_id.to_string();
        self.run(move |conn| {
            conn.query_row(
                "SELECT title FROM tasks WHERE id = ?1 AND tenant_id = ?2",
                params![task_id.to_string(), tenant_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)
        })
        .await
    }
}
