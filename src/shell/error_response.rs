// Boundary mapping for ApplicationError.
//
// Body shape: {"error": {"kind": "...", "code": "...", "message": "..."}}

use async_graphql::ErrorExtensions;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::shared::core::errors::{ApplicationError, ErrorKind};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                kind: kind.as_str(),
                code,
                message: message.into(),
            },
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match kind {
            ErrorKind::Unavailable | ErrorKind::Internal => {
                tracing::error!(error = %self, code = self.code(), "request failed")
            }
            _ => tracing::debug!(error = %self, code = self.code(), "request rejected"),
        }
        let body = ErrorBody::new(kind, self.code(), self.to_string());
        (status_for(kind), Json(body)).into_response()
    }
}

impl ErrorExtensions for ApplicationError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("kind", self.kind().as_str());
            extensions.set("code", self.code());
        })
    }
}
