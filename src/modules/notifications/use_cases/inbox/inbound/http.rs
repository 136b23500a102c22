use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::core::claims::Claims;
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkedResponse {
    pub message: &'static str,
    pub updated: usize,
}

pub async fn list(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    match state
        .inbox
        .list(&claims.tenant_id, claims.user_id, params.limit, params.offset)
        .await
    {
        Ok(page) => Json(page).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn unread_count(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match state
        .inbox
        .unread_count(&claims.tenant_id, claims.user_id)
        .await
    {
        Ok(unread_count) => Json(UnreadCountResponse { unread_count }).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn mark_read(
    State(state): State<AppState>,
    claims: Claims,
    Path(notification_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .inbox
        .mark_read(&claims.tenant_id, claims.user_id, notification_id)
        .await
    {
        Ok(()) => Json(MarkedResponse {
            message: "Marked as read",
            updated: 1,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn mark_all_read(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match state
        .inbox
        .mark_all_read(&claims.tenant_id, claims.user_id)
        .await
    {
        Ok(updated) => Json(MarkedResponse {
            message: "All notifications marked as read",
            updated,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}
