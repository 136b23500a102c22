use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ThresholdParams {
    pub threshold_hours: Option<f64>,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ThresholdParams>,
) -> impl IntoResponse {
    if let Err(err) = claims.authorize(Permission::ReviewExceptions) {
        return err.into_response();
    }
    match state
        .exceptions
        .handle(&claims.tenant_id, params.threshold_hours)
        .await
    {
        Ok(report) => Json(report).into_response(),
        Err(err) => err.into_response(),
    }
}
