use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::directory::core::ports::{TaskDirectory, UserDirectory};
use crate::shared::core::ports::StoreError;
use crate::shared::infrastructure::in_memory::store::InMemoryStore;

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn resolve_users(
        &self,
        tenant_id: &str,
        user_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, StoreError> {
        self.ensure_online()?;
        let users = self.users.read().await;
        Ok(user_ids
            .iter()
            .filter(|id| users.get(id).is_some_and(|u| u.tenant_id == tenant_id))
            .copied()
            .collect())
    }
}

#[async_trait]
impl TaskDirectory for InMemoryStore {
    async fn task_title(
        &self,
        tenant_id: &str,
        task_id: Uuid,
    ) -> Result<Option<String>, StoreError> {
        self.ensure_online()?;
        let tasks = self.tasks.read().await;
        Ok(tasks
            .get(&task_id)
            .filter(|t| t.tenant_id == tenant_id)
            .map(|t| t.title.clone()))
    }
}
