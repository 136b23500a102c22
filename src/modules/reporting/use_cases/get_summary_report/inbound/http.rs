use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::modules::reporting::use_cases::get_summary_report::handler::GetSummaryReport;
use crate::modules::reporting::use_cases::get_timesheet::inbound::http::DateRangeParams;
use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<DateRangeParams>,
) -> impl IntoResponse {
    if let Err(err) = claims.authorize(Permission::ViewSummaryReport) {
        return err.into_response();
    }
    let (start, end) = match params.bounds() {
        Ok(bounds) => bounds,
        Err(err) => return err.into_response(),
    };

    let query = GetSummaryReport {
        tenant_id: claims.tenant_id,
        start,
        end,
    };
    match state.summary_report.handle(query).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod get_summary_report_http_tests {
    use crate::test_support::fixtures::app_state::{TestApp, request};
    use axum::http::{Method, StatusCode};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_report_to_a_manager() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::GET, "/time/reports/summary").claims(&app.manager()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["unapproved_count"], 0);
        assert_eq!(response.body["summary"], serde_json::json!([]));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_forbid_an_admin() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::GET, "/time/reports/summary").claims(&app.admin()))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}
