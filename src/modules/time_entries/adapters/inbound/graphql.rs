use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::time_entries::core::time_entry::{TimeEntry, TimeEntryKind};
use crate::modules::time_entries::use_cases::clock_in::command::ClockIn;
use crate::modules::time_entries::use_cases::clock_out::command::ClockOut;
use crate::modules::time_entries::use_cases::current_status::handler::CurrentStatus;
use crate::shared::core::claims::Permission;
use crate::shell::graphql::{caller, invalid_argument, optional_instant, optional_uuid};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTimeEntry {
    pub id: String,
    pub user_id: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub kind: String,
    pub duration: Option<f64>,
    pub is_approved: bool,
    pub notes: Option<String>,
    pub task_id: Option<String>,
}

impl From<TimeEntry> for GqlTimeEntry {
    fn from(e: TimeEntry) -> Self {
        Self {
            id: e.id.to_string(),
            user_id: e.user_id.to_string(),
            start_time: e.start_time.to_rfc3339(),
            end_time: e.end_time.map(|t| t.to_rfc3339()),
            kind: e.kind.to_string(),
            duration: e.duration,
            is_approved: e.is_approved,
            notes: e.notes,
            task_id: e.task_id.map(|id| id.to_string()),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlOpenEntry {
    pub id: String,
    pub start_time: String,
    pub elapsed_hours: f64,
    pub kind: String,
}

#[derive(SimpleObject, Clone)]
pub struct GqlCurrentStatus {
    pub is_clocked_in: bool,
    pub current_entry: Option<GqlOpenEntry>,
    pub last_clock_out: Option<String>,
}

impl From<CurrentStatus> for GqlCurrentStatus {
    fn from(s: CurrentStatus) -> Self {
        Self {
            is_clocked_in: s.is_clocked_in,
            current_entry: s.current_entry.map(|open| GqlOpenEntry {
                id: open.id.to_string(),
                start_time: open.start_time.to_rfc3339(),
                elapsed_hours: open.elapsed_hours,
                kind: open.kind.to_string(),
            }),
            last_clock_out: s.last_clock_out.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Default)]
pub struct TimeEntriesQuery;

#[Object]
impl TimeEntriesQuery {
    async fn current_status(&self, context: &Context<'_>) -> GqlResult<GqlCurrentStatus> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        let status = state
            .current_status
            .handle(&claims.tenant_id, claims.user_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(status.into())
    }
}

#[derive(Default)]
pub struct TimeEntriesMutation;

#[Object]
impl TimeEntriesMutation {
    async fn clock_in(
        &self,
        context: &Context<'_>,
        start_time: Option<String>,
        kind: Option<String>,
        task_id: Option<String>,
        notes: Option<String>,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ClockIn)
            .map_err(|e| e.extend())?;

        let kind = match kind {
            Some(raw) => raw
                .parse::<TimeEntryKind>()
                .map_err(|e| invalid_argument(e.to_string()))?,
            None => TimeEntryKind::default(),
        };
        let command = ClockIn {
            tenant_id: claims.tenant_id.clone(),
            user_id: claims.user_id,
            start_time: optional_instant(start_time)?,
            kind,
            task_id: optional_uuid("task_id", task_id)?,
            notes,
        };

        let entry = state
            .clock_in
            .handle(command)
            .await
            .map_err(|e| e.extend())?;
        Ok(entry.into())
    }

    async fn clock_out(
        &self,
        context: &Context<'_>,
        end_time: Option<String>,
        notes: Option<String>,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        let command = ClockOut {
            tenant_id: claims.tenant_id.clone(),
            user_id: claims.user_id,
            end_time: optional_instant(end_time)?,
            notes,
        };

        let entry = state
            .clock_out
            .handle(command)
            .await
            .map_err(|e| e.extend())?;
        Ok(entry.into())
    }
}
