use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::reporting::core::report_window::parse_date_bound;
use crate::modules::reporting::use_cases::get_timesheet::handler::GetTimesheet;
use crate::shared::core::claims::{Claims, Permission};
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeParams {
    pub fn bounds(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), ApplicationError> {
        let start = self.start_date.as_deref().map(parse_date_bound).transpose()?;
        let end = self.end_date.as_deref().map(parse_date_bound).transpose()?;
        Ok((start, end))
    }
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Path(user_id): Path<Uuid>,
    Query(params): Query<DateRangeParams>,
) -> impl IntoResponse {
    if user_id != claims.user_id {
        if let Err(err) = claims.authorize(Permission::ViewOthersTimesheet) {
            return err.into_response();
        }
    }
    let (start, end) = match params.bounds() {
        Ok(bounds) => bounds,
        Err(err) => return err.into_response(),
    };

    let query = GetTimesheet {
        tenant_id: claims.tenant_id,
        user_id,
        start,
        end,
    };
    match state.timesheet.handle(query).await {
        Ok(timesheet) => Json(timesheet).into_response(),
        Err(err) => err.into_response(),
    }
}
