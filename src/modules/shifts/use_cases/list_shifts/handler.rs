use std::sync::Arc;

use crate::modules::shifts::core::ports::ShiftRepository;
use crate::modules::shifts::core::shift::Shift;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::time_window::TimeWindow;

/// Lists the tenant's shifts by start time, optionally only those intersecting a window.
pub struct ListShiftsHandler {
    shifts: Arc<dyn ShiftRepository>,
}

impl ListShiftsHandler {
    pub fn new(shifts: Arc<dyn ShiftRepository>) -> Self {
        Self { shifts }
    }

    pub async fn handle(
        &self,
        tenant_id: &str,
        window: Option<TimeWindow>,
    ) -> Result<Vec<Shift>, ApplicationError> {
        tracing::debug!(%tenant_id, ?window, "list shifts");
        Ok(self.shifts.list(tenant_id, window.as_ref()).await?)
    }
}
