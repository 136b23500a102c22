use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::shifts::use_cases::assign_users::handler::AssignUsers;
use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignUsersBody {
    pub user_ids: Vec<Uuid>,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Path(shift_id): Path<Uuid>,
    body: Result<Json<AssignUsersBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    if let Err(err) = claims.authorize(Permission::ManageShifts) {
        return err.into_response();
    }

    let command = AssignUsers {
        tenant_id: claims.tenant_id,
        shift_id,
        user_ids: body.user_ids,
        assigned_by: Some(claims.user_id),
    };

    match state.assign_users.handle(command).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod assign_users_http_tests {
    use crate::test_support::fixtures::app_state::{TestApp, request};
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    #[rstest]
    #[tokio::test]
    async fn it_should_assign_a_known_user() {
        let app = TestApp::new();
        let manager = app.manager();
        let worker = app.seed_user("Dana").await;
        let shift = app
            .send(request(Method::POST, "/time/shifts").claims(&manager).json(json!({
                "start_time": "2025-01-01T08:00:00Z",
                "end_time": "2025-01-01T12:00:00Z"
            })))
            .await;
        let uri = format!("/time/shifts/{}/assignees", shift.body["id"].as_str().unwrap());

        let response = app
            .send(request(Method::POST, &uri).claims(&manager).json(json!({ "user_ids": [worker] })))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["assigned"], 1);
        assert_eq!(response.body["newly_assigned"], 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_shift() {
        let app = TestApp::new();
        let uri = format!("/time/shifts/{}/assignees", Uuid::now_v7());
        let response = app
            .send(request(Method::POST, &uri).claims(&app.manager()).json(json!({ "user_ids": [] })))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"]["code"], "shift_not_found");
    }
}
