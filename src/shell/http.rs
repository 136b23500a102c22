use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Json, Router,
    response::{Html, IntoResponse},
    routing::{delete, get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::exceptions::use_cases::check_missing_clockouts::inbound::http as scan_http;
use crate::modules::exceptions::use_cases::get_exceptions::inbound::http as exceptions_http;
use crate::modules::notifications::use_cases::inbox::inbound::http as inbox_http;
use crate::modules::reporting::use_cases::get_summary_report::inbound::http as summary_http;
use crate::modules::reporting::use_cases::get_timesheet::inbound::http as timesheet_http;
use crate::modules::shifts::use_cases::assign_users::inbound::http as assign_http;
use crate::modules::shifts::use_cases::create_shift::inbound::http as create_shift_http;
use crate::modules::shifts::use_cases::delete_shift::inbound::http as delete_shift_http;
use crate::modules::shifts::use_cases::list_shifts::inbound::http as list_shifts_http;
use crate::modules::time_entries::use_cases::backfill_durations::inbound::http as backfill_http;
use crate::modules::time_entries::use_cases::clock_in::inbound::http as clock_in_http;
use crate::modules::time_entries::use_cases::clock_out::inbound::http as clock_out_http;
use crate::modules::time_entries::use_cases::current_status::inbound::http as status_http;
use crate::shared::core::claims::Claims;
use crate::shell::graphql::{AppSchema, build_schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/time/clock-in", post(clock_in_http::handle))
        .route("/time/clock-out", post(clock_out_http::handle))
        .route("/time/current-status", get(status_http::handle))
        .route("/time/admin/backfill-durations", post(backfill_http::handle))
        .route("/time/timesheets/{user_id}", get(timesheet_http::handle))
        .route("/time/reports/summary", get(summary_http::handle))
        .route("/time/exceptions", get(exceptions_http::handle))
        .route("/time/exceptions/scan", post(scan_http::handle))
        .route(
            "/time/shifts",
            get(list_shifts_http::handle).post(create_shift_http::handle),
        )
        .route("/time/shifts/{shift_id}", delete(delete_shift_http::handle))
        .route("/time/shifts/{shift_id}/assignees", post(assign_http::handle))
        .route("/notifications", get(inbox_http::list))
        .route("/notifications/unread-count", get(inbox_http::unread_count))
        .route("/notifications/read-all", post(inbox_http::mark_all_read))
        .route("/notifications/{id}/read", post(inbox_http::mark_read))
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .with_state(state)
}

/// Router with the tracing and CORS layers the binary serves.
pub fn app(state: AppState) -> Router {
    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn graphql(
    Extension(schema): Extension<AppSchema>,
    claims: Claims,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner().data(claims)).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
