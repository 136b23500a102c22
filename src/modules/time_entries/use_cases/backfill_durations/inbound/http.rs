use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_entries::use_cases::backfill_durations::handler::BackfillScope;
use crate::shared::core::claims::{Claims, Permission};
use crate::shell::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BackfillParams {
    #[serde(default)]
    pub all_tenants: bool,
}

pub async fn handle(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<BackfillParams>,
) -> impl IntoResponse {
    let (permission, scope) = if params.all_tenants {
        (Permission::BackfillAllTenants, BackfillScope::AllTenants)
    } else {
        (
            Permission::BackfillTenant,
            BackfillScope::Tenant(claims.tenant_id.clone()),
        )
    };
    if let Err(err) = claims.authorize(permission) {
        return err.into_response();
    }

    match state.backfill_durations.handle(scope).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod backfill_durations_http_tests {
    use crate::test_support::fixtures::app_state::{TestApp, request};
    use axum::http::{Method, StatusCode};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_let_an_admin_backfill_their_tenant() {
        let app = TestApp::new();
        let response = app
            .send(request(Method::POST, "/time/admin/backfill-durations").claims(&app.admin()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["filled"], 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reserve_all_tenants_for_superadmins() {
        let app = TestApp::new();
        let response = app
            .send(
                request(Method::POST, "/time/admin/backfill-durations?all_tenants=true")
                    .claims(&app.admin()),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);

        let response = app
            .send(
                request(Method::POST, "/time/admin/backfill-durations?all_tenants=true")
                    .claims(&app.superadmin()),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}
