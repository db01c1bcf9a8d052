//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::query::QueryError;

/// Anything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    /// No route matches, including integer routes given a non-integer segment.
    #[error(
        "The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again."
    )]
    RouteNotFound,

    /// An id literal too large for any stored identifier.
    #[error("Passenger with ID {0} not found")]
    IdOutOfRange(String),
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(QueryError::NotFound { .. })
            | ApiError::RouteNotFound
            | ApiError::IdOutOfRange(_) => StatusCode::NOT_FOUND,
            ApiError::Query(QueryError::InvalidArgument { .. }) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match status {
            StatusCode::BAD_REQUEST => "Bad request",
            _ => "Not found",
        };
        debug!(status = status.as_u16(), error = %self, "request failed");

        let body = ErrorResponse {
            error,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
