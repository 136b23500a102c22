use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Path(shift_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(err) = claims.authorize(Permission::ManageShifts) {
        return err.into_response();
    }
    match state.delete_shift.handle(&claims.tenant_id, shift_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
