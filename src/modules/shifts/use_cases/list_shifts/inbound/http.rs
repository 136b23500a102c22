use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::modules::reporting::core::errors::ReportError;
use crate::modules::reporting::core::report_window::parse_date_bound;
use crate::shared::core::claims::Claims;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::time_window::TimeWindow;
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListShiftsParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ListShiftsParams>,
) -> impl IntoResponse {
    let window = match shift_window(&params) {
        Ok(window) => window,
        Err(err) => return err.into_response(),
    };
    match state.list_shifts.handle(&claims.tenant_id, window).await {
        Ok(shifts) => Json(shifts).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) fn shift_window(params: &ListShiftsParams) -> Result<Option<TimeWindow>, ApplicationError> {
    let from = params.from.as_deref().map(parse_date_bound).transpose()?;
    let to = params.to.as_deref().map(parse_date_bound).transpose()?;
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let start = from.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let end = to.unwrap_or(DateTime::<Utc>::MAX_UTC);
    if start > end {
        return Err(ReportError::InvalidRange { start, end }.into());
    }
    Ok(Some(TimeWindow::new(start, end)))
}

#[cfg(test)]
mod list_shifts_http_tests {
    use crate::test_support::fixtures::app_state::{TestApp, request};
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn it_should_list_shifts_for_any_role() {
        let app = TestApp::new();
        app.send(request(Method::POST, "/time/shifts").claims(&app.manager()).json(json!({
            "start_time": "2025-01-01T08:00:00Z",
            "end_time": "2025-01-01T12:00:00Z"
        })))
        .await;

        let response = app
            .send(request(Method::GET, "/time/shifts?from=2025-01-01&to=2025-01-02").claims(&app.technician()))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.as_array().map(Vec::len), Some(1));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_400_for_a_malformed_date() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::GET, "/time/shifts?from=yesterday").claims(&app.technician()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["code"], "invalid_date");
    }
}
