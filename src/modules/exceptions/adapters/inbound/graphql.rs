use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::exceptions::core::views::{
    ExceptionReport, MissingClockout, MissingClockoutScan, OvertimeEntry,
};
use crate::shared::core::claims::Permission;
use crate::shell::graphql::caller;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlMissingClockout {
    pub id: String,
    pub user_id: String,
    pub start_time: String,
    pub kind: String,
}

impl From<MissingClockout> for GqlMissingClockout {
    fn from(m: MissingClockout) -> Self {
        Self {
            id: m.id.to_string(),
            user_id: m.user_id.to_string(),
            start_time: m.start_time.to_rfc3339(),
            kind: m.kind.to_string(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlOvertimeEntry {
    pub id: String,
    pub user_id: String,
    pub start_time: String,
    pub duration: f64,
}

impl From<OvertimeEntry> for GqlOvertimeEntry {
    fn from(o: OvertimeEntry) -> Self {
        Self {
            id: o.id.to_string(),
            user_id: o.user_id.to_string(),
            start_time: o.start_time.to_rfc3339(),
            duration: o.duration,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlExceptionReport {
    pub threshold_hours: f64,
    pub missing_clockouts: Vec<GqlMissingClockout>,
    pub overtime: Vec<GqlOvertimeEntry>,
}

impl From<ExceptionReport> for GqlExceptionReport {
    fn from(r: ExceptionReport) -> Self {
        Self {
            threshold_hours: r.threshold_hours,
            missing_clockouts: r.missing_clockouts.into_iter().map(Into::into).collect(),
            overtime: r.overtime.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlMissingClockoutScan {
    pub threshold_hours: f64,
    pub flagged: Vec<GqlMissingClockout>,
    pub notified: u64,
}

impl From<MissingClockoutScan> for GqlMissingClockoutScan {
    fn from(s: MissingClockoutScan) -> Self {
        Self {
            threshold_hours: s.threshold_hours,
            flagged: s.flagged.into_iter().map(Into::into).collect(),
            notified: s.notified as u64,
        }
    }
}

#[derive(Default)]
pub struct ExceptionsQuery;

#[Object]
impl ExceptionsQuery {
    async fn exceptions(
        &self,
        context: &Context<'_>,
        threshold_hours: Option<f64>,
    ) -> GqlResult<GqlExceptionReport> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ReviewExceptions)
            .map_err(|e| e.extend())?;

        let report = state
            .exceptions
            .handle(&claims.tenant_id, threshold_hours)
            .await
            .map_err(|e| e.extend())?;
        Ok(report.into())
    }
}

#[derive(Default)]
pub struct ExceptionsMutation;

#[Object]
impl ExceptionsMutation {
    async fn check_missing_clockouts(
        &self,
        context: &Context<'_>,
        threshold_hours: Option<f64>,
    ) -> GqlResult<GqlMissingClockoutScan> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ReviewExceptions)
            .map_err(|e| e.extend())?;

        let scan = state
            .check_missing_clockouts
            .handle(&claims.tenant_id, threshold_hours)
            .await
            .map_err(|e| e.extend())?;
        Ok(scan.into())
    }
}
