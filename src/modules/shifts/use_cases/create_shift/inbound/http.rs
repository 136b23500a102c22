use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::modules::shifts::use_cases::create_shift::command::CreateShift;
use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateShiftBody {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    body: Result<Json<CreateShiftBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    if let Err(err) = claims.authorize(Permission::ManageShifts) {
        return err.into_response();
    }

    let command = CreateShift {
        tenant_id: claims.tenant_id,
        start_time: body.start_time,
        end_time: body.end_time,
        role: body.role,
        team: body.team,
        description: body.description,
        is_recurring: body.is_recurring,
    };

    match state.create_shift.handle(command).await {
        Ok(shift) => (StatusCode::CREATED, Json(shift)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod create_shift_http_tests {
    use crate::test_support::fixtures::app_state::{TestApp, request};
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn it_should_return_201_then_409_on_overlap() {
        let app = TestApp::new();
        let manager = app.manager();
        let first = app
            .send(request(Method::POST, "/time/shifts").claims(&manager).json(json!({
                "start_time": "2025-01-01T08:00:00Z",
                "end_time": "2025-01-01T12:00:00Z",
                "team": "north"
            })))
            .await;
        let second = app
            .send(request(Method::POST, "/time/shifts").claims(&manager).json(json!({
                "start_time": "2025-01-01T10:00:00Z",
                "end_time": "2025-01-01T14:00:00Z"
            })))
            .await;

        assert_eq!(first.status, StatusCode::CREATED);
        assert_eq!(first.body["team"], "north");
        assert_eq!(first.body["assignees"], json!([]));
        assert_eq!(second.status, StatusCode::CONFLICT);
        assert_eq!(second.body["error"]["code"], "overlap_conflict");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_400_for_an_inverted_interval() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::POST, "/time/shifts").claims(&app.manager()).json(json!({
                "start_time": "2025-01-01T12:00:00Z",
                "end_time": "2025-01-01T08:00:00Z"
            })))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["kind"], "validation");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_403_for_a_technician() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::POST, "/time/shifts").claims(&app.technician()).json(json!({
                "start_time": "2025-01-01T08:00:00Z",
                "end_time": "2025-01-01T12:00:00Z"
            })))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}
