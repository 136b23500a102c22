// GraphQL schema assembly and resolver helpers.
//
// Notes
// - Each bounded context contributes a query and a mutation object; they are merged here.
// - Resolvers read AppState and the caller's Claims from the request data.

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, MergedObject, Result as GqlResult, Schema,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::exceptions::adapters::inbound::graphql::{ExceptionsMutation, ExceptionsQuery};
use crate::modules::reporting::adapters::inbound::graphql::ReportingQuery;
use crate::modules::reporting::core::report_window::parse_date_bound;
use crate::modules::shifts::adapters::inbound::graphql::{ShiftsMutation, ShiftsQuery};
use crate::modules::time_entries::adapters::inbound::graphql::{
    TimeEntriesMutation, TimeEntriesQuery,
};
use crate::shared::core::claims::Claims;
use crate::shared::core::errors::{ApplicationError, ErrorKind};
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(TimeEntriesQuery, ReportingQuery, ExceptionsQuery, ShiftsQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(TimeEntriesMutation, ShiftsMutation, ExceptionsMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

fn boundary_error(kind: ErrorKind, code: &'static str, message: String) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, extensions| {
        extensions.set("kind", kind.as_str());
        extensions.set("code", code);
    })
}

pub fn caller<'a>(context: &Context<'a>) -> GqlResult<&'a Claims> {
    context.data::<Claims>().map_err(|_| {
        boundary_error(
            ErrorKind::Unauthenticated,
            "missing_claims",
            "missing identity claims".into(),
        )
    })
}

pub fn invalid_argument(message: String) -> async_graphql::Error {
    boundary_error(ErrorKind::Validation, "invalid_argument", message)
}

pub fn instant(raw: &str) -> GqlResult<DateTime<Utc>> {
    parse_date_bound(raw).map_err(|e| ApplicationError::from(e).extend())
}

pub fn optional_instant(raw: Option<String>) -> GqlResult<Option<DateTime<Utc>>> {
    raw.as_deref().map(instant).transpose()
}

pub fn uuid(field: &str, raw: &str) -> GqlResult<Uuid> {
    raw.parse::<Uuid>()
        .map_err(|_| invalid_argument(format!("{field} is not a valid id: '{raw}'")))
}

pub fn optional_uuid(field: &str, raw: Option<String>) -> GqlResult<Option<Uuid>> {
    raw.as_deref().map(|r| uuid(field, r)).transpose()
}
