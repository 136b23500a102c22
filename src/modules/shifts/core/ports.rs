// Persistence port for the shift scheduler.
//
// Responsibilities
// - insert_exclusive re-checks overlap and inserts as one atomic step per tenant.
// - add_assignments ignores pairs that already exist, which makes assignment idempotent.
// - delete removes the shift together with its assignment rows.

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::shifts::core::shift::{Shift, ShiftAssignment};
use crate::shared::core::ports::StoreError;
use crate::shared::core::time_window::TimeWindow;

pub const SHIFT_OVERLAP_CONSTRAINT: &str = "shift_overlap";

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Tenant shifts ordered by start_time, restricted to those intersecting `window` when given.
    async fn list(
        &self,
        tenant_id: &str,
        window: Option<&TimeWindow>,
    ) -> Result<Vec<Shift>, StoreError>;

    async fn find(&self, tenant_id: &str, shift_id: Uuid) -> Result<Option<Shift>, StoreError>;

    /// Fails with `StoreError::Conflict { constraint: SHIFT_OVERLAP_CONSTRAINT }` when another
    /// shift of the tenant intersects the new one.
    async fn insert_exclusive(&self, shift: &Shift) -> Result<(), StoreError>;

    /// Returns the user ids whose rows were actually added. `StoreError::Stale` when the shift is gone.
    async fn add_assignments(
        &self,
        tenant_id: &str,
        assignments: &[ShiftAssignment],
    ) -> Result<Vec<Uuid>, StoreError>;

    /// Returns false when the shift does not exist in the tenant.
    async fn delete(&self, tenant_id: &str, shift_id: Uuid) -> Result<bool, StoreError>;
}
