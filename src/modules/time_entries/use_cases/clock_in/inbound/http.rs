use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::time_entries::core::time_entry::{TimeEntry, TimeEntryKind};
use crate::modules::time_entries::use_cases::clock_in::command::ClockIn;
use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClockInBody {
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kind: TimeEntryKind,
    pub task_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClockInResponse {
    pub message: &'static str,
    pub entry: TimeEntry,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    body: Result<Json<ClockInBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    if let Err(err) = claims.authorize(Permission::ClockIn) {
        return err.into_response();
    }

    let command = ClockIn {
        tenant_id: claims.tenant_id,
        user_id: claims.user_id,
        start_time: body.start_time,
        kind: body.kind,
        task_id: body.task_id,
        notes: body.notes,
    };

    match state.clock_in.handle(command).await {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(ClockInResponse {
                message: "Clocked in successfully",
                entry,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
