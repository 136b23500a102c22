// Assign users to a shift.
//
// Responsibilities
// - Resolve the requested ids against the tenant's user directory; unknown ids are skipped.
// - Add only missing (shift, user) pairs so repeated assignment is a no-op.
// - Tell newly assigned users about the shift, best effort.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::directory::core::ports::UserDirectory;
use crate::modules::notifications::core::notification::{NewNotification, NotificationKind};
use crate::modules::notifications::core::ports::NotificationSink;
use crate::modules::shifts::core::errors::ShiftError;
use crate::modules::shifts::core::ports::ShiftRepository;
use crate::modules::shifts::core::shift::{Shift, ShiftAssignment};
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub struct AssignUsers {
    pub tenant_id: String,
    pub shift_id: Uuid,
    pub user_ids: Vec<Uuid>,
    pub assigned_by: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentOutcome {
    pub shift_id: Uuid,
    /// Resolved users, whether or not they were already assigned.
    pub assigned: usize,
    pub newly_assigned: usize,
    pub user_ids: Vec<Uuid>,
}

pub struct AssignUsersHandler {
    shifts: Arc<dyn ShiftRepository>,
    users: Arc<dyn UserDirectory>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl AssignUsersHandler {
    pub fn new(
        shifts: Arc<dyn ShiftRepository>,
        users: Arc<dyn UserDirectory>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shifts,
            users,
            sink,
            clock,
        }
    }

    pub async fn handle(&self, command: AssignUsers) -> Result<AssignmentOutcome, ApplicationError> {
        let Some(shift) = self.shifts.find(&command.tenant_id, command.shift_id).await? else {
            return Err(ShiftError::ShiftNotFound(command.shift_id).into());
        };

        let mut seen = HashSet::new();
        let requested: Vec<Uuid> = command
            .user_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        let resolved = self
            .users
            .resolve_users(&command.tenant_id, &requested)
            .await?;
        if resolved.is_empty() {
            return Err(ShiftError::NoValidUsers.into());
        }

        let now = self.clock.now();
        let fresh: Vec<ShiftAssignment> = resolved
            .iter()
            .filter(|user_id| !shift.is_assigned(**user_id))
            .map(|user_id| ShiftAssignment {
                shift_id: shift.id,
                user_id: *user_id,
                accepted: false,
                assigned_by: command.assigned_by,
                assigned_at: now,
            })
            .collect();

        let added = match self.shifts.add_assignments(&command.tenant_id, &fresh).await {
            Ok(added) => added,
            Err(StoreError::Stale { .. }) => {
                return Err(ShiftError::ShiftNotFound(command.shift_id).into());
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            tenant_id = %command.tenant_id,
            shift_id = %shift.id,
            requested = requested.len(),
            resolved = resolved.len(),
            added = added.len(),
            "users assigned to shift"
        );

        for user_id in &added {
            self.notify_assigned(&shift, *user_id).await;
        }

        Ok(AssignmentOutcome {
            shift_id: shift.id,
            assigned: resolved.len(),
            newly_assigned: added.len(),
            user_ids: resolved,
        })
    }

    async fn notify_assigned(&self, shift: &Shift, user_id: Uuid) {
        let notification = NewNotification::to_user(
            shift.tenant_id.clone(),
            user_id,
            NotificationKind::ShiftAssigned,
            format!(
                "You have been assigned to a shift on {} from {} to {}",
                shift.start_time.date_naive(),
                clock_time(shift.start_time),
                clock_time(shift.end_time),
            ),
        )
        .with_payload(json!({ "shift_id": shift.id }));
        if let Err(err) = self.sink.notify(notification).await {
            tracing::warn!(shift_id = %shift.id, %user_id, error = %err, "shift assignment notification dropped");
        }
    }
}

fn clock_time(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}
