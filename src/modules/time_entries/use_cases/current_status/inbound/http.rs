use axum::{Json, extract::State, response::IntoResponse};

use crate::shared::core::claims::Claims;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match state
        .current_status
        .handle(&claims.tenant_id, claims.user_id)
        .await
    {
        Ok(status) => Json(status).into_response(),
        Err(err) => err.into_response(),
    }
}
