use std::sync::Arc;
use uuid::Uuid;

use crate::modules::shifts::core::errors::ShiftError;
use crate::modules::shifts::core::ports::ShiftRepository;
use crate::shared::core::errors::ApplicationError;

/// Removes a shift and, through the store, its assignment rows.
pub struct DeleteShiftHandler {
    shifts: Arc<dyn ShiftRepository>,
}

impl DeleteShiftHandler {
    pub fn new(shifts: Arc<dyn ShiftRepository>) -> Self {
        Self { shifts }
    }

    pub async fn handle(&self, tenant_id: &str, shift_id: Uuid) -> Result<(), ApplicationError> {
        if !self.shifts.delete(tenant_id, shift_id).await? {
            return Err(ShiftError::ShiftNotFound(shift_id).into());
        }
        tracing::info!(%tenant_id, %shift_id, "shift deleted");
        Ok(())
    }
}
