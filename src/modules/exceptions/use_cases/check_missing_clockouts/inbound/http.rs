use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::modules::exceptions::use_cases::get_exceptions::inbound::http::ThresholdParams;
use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ThresholdParams>,
) -> impl IntoResponse {
    if let Err(err) = claims.authorize(Permission::ReviewExceptions) {
        return err.into_response();
    }
    match state
        .check_missing_clockouts
        .handle(&claims.tenant_id, params.threshold_hours)
        .await
    {
        Ok(scan) => Json(scan).into_response(),
        Err(err) => err.into_response(),
    }
}
