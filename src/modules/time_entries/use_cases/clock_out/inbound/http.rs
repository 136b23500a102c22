use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::use_cases::clock_out::command::ClockOut;
use crate::shared::core::claims::Claims;
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClockOutBody {
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClockOutResponse {
    pub message: &'static str,
    pub entry: TimeEntry,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    body: Result<Json<ClockOutBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = ClockOut {
        tenant_id: claims.tenant_id,
        user_id: claims.user_id,
        end_time: body.end_time,
        notes: body.notes,
    };

    match state.clock_out.handle(command).await {
        Ok(entry) => Json(ClockOutResponse {
            message: "Clocked out successfully",
            entry,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod clock_out_http_tests {
    use crate::test_support::fixtures::app_state::{TestApp, request};
    use crate::test_support::fixtures::time_entries::at;
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn it_should_close_the_open_entry() {
        let app = TestApp::new();
        let claims = app.technician();
        app.send(
            request(Method::POST, "/time/clock-in")
                .claims(&claims)
                .json(json!({ "start_time": "2025-01-01T09:00:00Z" })),
        )
        .await;
        app.clock.set(at(18, 0));

        let response = app
            .send(request(Method::POST, "/time/clock-out").claims(&claims).json(json!({ "notes": "done" })))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["entry"]["duration"], 9.0);
        assert_eq!(response.body["entry"]["kind"], "overtime");
        assert_eq!(response.body["entry"]["notes"], "done");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_404_without_an_open_entry() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::POST, "/time/clock-out").claims(&app.technician()).json(json!({})))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"]["code"], "no_open_entry");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_400_when_ending_before_the_start() {
        let app = TestApp::new();
        let claims = app.technician();
        app.send(
            request(Method::POST, "/time/clock-in")
                .claims(&claims)
                .json(json!({ "start_time": "2025-01-01T09:00:00Z" })),
        )
        .await;

        let response = app
            .send(
                request(Method::POST, "/time/clock-out")
                    .claims(&claims)
                    .json(json!({ "end_time": "2025-01-01T08:00:00Z" })),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["code"], "end_before_start");
    }
}
