// Claims extractor.
//
// Notes
// - Identity is verified upstream. The service only reads x-user-id, x-tenant-id and x-role.
// - Missing or malformed headers reject with 401 before the handler runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::claims::{Claims, Role};
use crate::shared::core::errors::ErrorKind;
use crate::shell::error_response::{ErrorBody, status_for};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const ROLE_HEADER: &str = "x-role";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimsRejection {
    #[error("missing header '{0}'")]
    Missing(&'static str),

    #[error("malformed header '{0}'")]
    Malformed(&'static str),
}

impl IntoResponse for ClaimsRejection {
    fn into_response(self) -> Response {
        let code = match self {
            ClaimsRejection::Missing(_) => "missing_claims",
            ClaimsRejection::Malformed(_) => "malformed_claims",
        };
        let kind = ErrorKind::Unauthenticated;
        (status_for(kind), Json(ErrorBody::new(kind, code, self.to_string()))).into_response()
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, ClaimsRejection> {
    let value = headers.get(name).ok_or(ClaimsRejection::Missing(name))?;
    let value = value
        .to_str()
        .map_err(|_| ClaimsRejection::Malformed(name))?
        .trim();
    if value.is_empty() {
        return Err(ClaimsRejection::Missing(name));
    }
    Ok(value)
}

pub fn claims_from_headers(headers: &HeaderMap) -> Result<Claims, ClaimsRejection> {
    let user_id = header(headers, USER_ID_HEADER)?
        .parse::<Uuid>()
        .map_err(|_| ClaimsRejection::Malformed(USER_ID_HEADER))?;
    let tenant_id = header(headers, TENANT_ID_HEADER)?;
    let role = header(headers, ROLE_HEADER)?
        .parse::<Role>()
        .map_err(|_| ClaimsRejection::Malformed(ROLE_HEADER))?;
    Ok(Claims::new(user_id, tenant_id, role))
}

impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = ClaimsRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_from_headers(&parts.headers)
    }
}
