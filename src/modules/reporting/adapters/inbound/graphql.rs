use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::reporting::use_cases::get_summary_report::handler::{
    GetSummaryReport, SummaryReport,
};
use crate::modules::reporting::use_cases::get_timesheet::handler::{GetTimesheet, Timesheet};
use crate::shared::core::claims::Permission;
use crate::shell::graphql::{caller, optional_instant, uuid};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTimesheetRow {
    pub id: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration: Option<f64>,
    pub kind: String,
    pub is_approved: bool,
    pub notes: Option<String>,
    pub task_title: String,
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimesheet {
    pub user_id: String,
    pub start: String,
    pub end: String,
    pub entries: Vec<GqlTimesheetRow>,
    pub total_hours: f64,
}

impl From<Timesheet> for GqlTimesheet {
    fn from(t: Timesheet) -> Self {
        Self {
            user_id: t.user_id.to_string(),
            start: t.start.to_rfc3339(),
            end: t.end.to_rfc3339(),
            entries: t
                .entries
                .into_iter()
                .map(|row| GqlTimesheetRow {
                    id: row.id.to_string(),
                    start_time: row.start_time.to_rfc3339(),
                    end_time: row.end_time.map(|t| t.to_rfc3339()),
                    duration: row.duration,
                    kind: row.kind.to_string(),
                    is_approved: row.is_approved,
                    notes: row.notes,
                    task_title: row.task_title,
                })
                .collect(),
            total_hours: t.total_hours,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlSummaryLine {
    pub kind: String,
    pub is_approved: bool,
    pub total_hours: f64,
}

#[derive(SimpleObject, Clone)]
pub struct GqlSummaryReport {
    pub start: String,
    pub end: String,
    pub summary: Vec<GqlSummaryLine>,
    pub total_hours: f64,
    pub unapproved_count: u64,
}

impl From<SummaryReport> for GqlSummaryReport {
    fn from(r: SummaryReport) -> Self {
        Self {
            start: r.start.to_rfc3339(),
            end: r.end.to_rfc3339(),
            summary: r
                .summary
                .into_iter()
                .map(|line| GqlSummaryLine {
                    kind: line.kind.to_string(),
                    is_approved: line.is_approved,
                    total_hours: line.total_hours,
                })
                .collect(),
            total_hours: r.total_hours,
            unapproved_count: r.unapproved_count as u64,
        }
    }
}

#[derive(Default)]
pub struct ReportingQuery;

#[Object]
impl ReportingQuery {
    /// Defaults to the caller's own timesheet.
    async fn timesheet(
        &self,
        context: &Context<'_>,
        user_id: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> GqlResult<GqlTimesheet> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        let user_id = match user_id {
            Some(raw) => uuid("user_id", &raw)?,
            None => claims.user_id,
        };
        if user_id != claims.user_id {
            claims
                .authorize(Permission::ViewOthersTimesheet)
                .map_err(|e| e.extend())?;
        }

        let query = GetTimesheet {
            tenant_id: claims.tenant_id.clone(),
            user_id,
            start: optional_instant(start_date)?,
            end: optional_instant(end_date)?,
        };
        let timesheet = state
            .timesheet
            .handle(query)
            .await
            .map_err(|e| e.extend())?;
        Ok(timesheet.into())
    }

    async fn summary_report(
        &self,
        context: &Context<'_>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> GqlResult<GqlSummaryReport> {
        let state = context.data_unchecked::<AppState>();
        let claims = caller(context)?;
        claims
            .authorize(Permission::ViewSummaryReport)
            .map_err(|e| e.extend())?;

        let query = GetSummaryReport {
            tenant_id: claims.tenant_id.clone(),
            start: optional_instant(start_date)?,
            end: optional_instant(end_date)?,
        };
        let report = state
            .summary_report
            .handle(query)
            .await
            .map_err(|e| e.extend())?;
        Ok(report.into())
    }
}
