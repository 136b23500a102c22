use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::shifts::core::shift::{Shift, ShiftAssignment};
use crate::modules::shifts::use_cases::assign_users::handler::{AssignUsers, AssignmentOutcome};
use crate::modules::shifts::use_cases::create_shift::command::CreateShift;
use crate::modules::shifts::use_cases::list_shifts::inbound::http::{ListShiftsParams, shift_window};
use crate::shared::core::claims::Permission;
use crate::shell::graphql::{caller, instant, uuid};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlShiftAssignment {
    pub user_id: String,
    pub accepted: bool,
    pub assigned_by: Option<String>,
    pub assigned_at: String,
}

impl From<ShiftAssignment> for GqlShiftAssignment {
    fn from(a: ShiftAssignment) -> Self {
        Self {
            user_id: a.user_id.to_string(),
            accepted: a.accepted,
            assigned_by: a.assigned_by.map(|id| id.to_string()),
            assigned_at: a.assigned_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlShift {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub role: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub assignees: Vec<GqlShiftAssignment>,
}

impl From<Shift> for GqlShift {
    fn from(s: Shift) -> Self {
        Self {
            id: s.id.to_string(),
            start_time: s.start_time.to_rfc3339(),
            end_time: s.end_time.to_rfc3339(),
            role: s.role,
            team: s.team,
            description: s.description,
            is_recurring: s.is_recurring,
            assignees: s.assignees.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlAssignmentOutcome {
    pub shift_id: String,
    pub assigned: u64,
    pub newly_assigned: u64,
    pub user_ids: Vec<String>,
}

impl From<AssignmentOutcome> for GqlAssignmentOutcome {
    fn from(o: AssignmentOutcome) -> Self {
        Self {
            shift_id: o.shift_id.to_string(),
            assigned: o.assigned as u64,
            newly_assigned: o.newly_assigned as u64,
            user_ids: o.user_ids.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Default)]
pub struct ShiftsQuery;

#[Object]
impl ShiftsQuery {
    async fn shifts(
        &self,
        context: &Context<'_>,
        from: Option<String>,
        to: Option<String>,
    ) -> GqlResult<Vec<GqlShift>> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        let window = shift_window(&ListShiftsParams { from, to }).map_err(|e| e.extend())?;
        let shifts = state
            .list_shifts
            .handle(&claims.tenant_id, window)
            .await
            .map_err(|e| e.extend())?;
        Ok(shifts.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct ShiftsMutation;

#[Object]
impl ShiftsMutation {
    #[allow(clippy::too_many_arguments)]
    async fn create_shift(
        &self,
        context: &Context<'_>,
        start_time: String,
        end_time: String,
        role: Option<String>,
        team: Option<String>,
        description: Option<String>,
        is_recurring: Option<bool>,
    ) -> GqlResult<GqlShift> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ManageShifts)
            .map_err(|e| e.extend())?;

        let command = CreateShift {
            role,
            team,
            description,
            is_recurring: is_recurring.unwrap_or(false),
            ..CreateShift::new(
                claims.tenant_id.clone(),
                instant(&start_time)?,
                instant(&end_time)?,
            )
        };
        let shift = state
            .create_shift
            .handle(command)
            .await
            .map_err(|e| e.extend())?;
        Ok(shift.into())
    }

    async fn assign_users(
        &self,
        context: &Context<'_>,
        shift_id: String,
        user_ids: Vec<String>,
    ) -> GqlResult<GqlAssignmentOutcome> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ManageShifts)
            .map_err(|e| e.extend())?;

        let command = AssignUsers {
            tenant_id: claims.tenant_id.clone(),
            shift_id: uuid("shift_id", &shift_id)?,
            user_ids: user_ids
                .iter()
                .map(|raw| uuid("user_ids", raw))
                .collect::<GqlResult<_>>()?,
            assigned_by: Some(claims.user_id),
        };
        let outcome = state
            .assign_users
            .handle(command)
            .await
            .map_err(|e| e.extend())?;
        Ok(outcome.into())
    }

    async fn delete_shift(&self, context: &Context<'_>, shift_id: String) -> GqlResult<bool> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ManageShifts)
            .map_err(|e| e.extend())?;

        state
            .delete_shift
            .handle(&claims.tenant_id, uuid("shift_id", &shift_id)?)
            .await
            .map_err(|e| e.extend())?;
        Ok(true)
    }
}
