// Read-only lookups against the tenant's entity store.
//
// Purpose
// - Validate foreign references (assignees, clock-in task) without owning users or tasks.
//
// Notes
// - Both lookups are tenant scoped. A record in another tenant does not exist for the caller.

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::core::ports::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: Uuid,
    pub tenant_id: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTask {
    pub id: Uuid,
    pub tenant_id: String,
    pub title: String,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the subset of `user_ids` that exist in the tenant, in input order.
    async fn resolve_users(
        &self,
        tenant_id: &str,
        user_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, StoreError>;
}

#[async_trait]
pub trait TaskDirectory: Send + Sync {
    async fn task_title(&self, tenant_id: &str, task_id: Uuid)
    -> Result<Option<String>, StoreError>;
}
