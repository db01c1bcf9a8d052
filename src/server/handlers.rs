//! REST handlers over the shared [`QueryEngine`]

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::error::ApiError;
use crate::query::QueryEngine;
use crate::record::Passenger;

/// Shared application state
pub type AppState = Arc<QueryEngine>;

#[derive(Serialize)]
pub struct PassengerList<'a> {
    pub passengers: Vec<&'a Passenger>,
}

#[derive(Serialize)]
pub struct PassengerDetail<'a> {
    pub passenger: &'a Passenger,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub passengers: usize,
}

/// An integer path segment, clamped to the `i64` range.
struct IntSegment {
    value: i64,
    /// False when the literal overflowed and `value` was clamped.
    exact: bool,
}

/// Integer routes match an optional `-` followed by ASCII digits; anything
/// else is an unknown URL.
fn parse_segment(raw: &str) -> Result<IntSegment, ApiError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RouteNotFound);
    }
    Ok(match raw.parse::<i64>() {
        Ok(value) => IntSegment { value, exact: true },
        Err(_) => IntSegment {
            value: if raw.starts_with('-') { i64::MIN } else { i64::MAX },
            exact: false,
        },
    })
}

/// GET /health
pub async fn health(State(engine): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        passengers: engine.len(),
    })
}

/// GET /api/passengers
pub async fn list_passengers(State(engine): State<AppState>) -> Response {
    let passengers: Vec<&Passenger> = engine.list_all().iter().collect();
    debug!(count = passengers.len(), "listing passengers");
    Json(PassengerList { passengers }).into_response()
}

/// GET /api/passengers/:id
pub async fn get_passenger(
    State(engine): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_segment(&raw)?;
    if !id.exact {
        return Err(ApiError::IdOutOfRange(raw));
    }
    let passenger = engine.get_by_id(id.value)?;
    Ok(Json(PassengerDetail { passenger }).into_response())
}

/// GET /api/passengers/survived/:status
pub async fn passengers_by_survival(
    State(engine): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, ApiError> {
    let status = parse_segment(&raw)?.value;
    let passengers = engine.filter_by_survival(status)?;
    debug!(status, count = passengers.len(), "filtered by survival");
    Ok(Json(PassengerList { passengers }).into_response())
}

/// GET /api/passengers/class/:class_num
pub async fn passengers_by_class(
    State(engine): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, ApiError> {
    let class_num = parse_segment(&raw)?.value;
    let passengers = engine.filter_by_class(class_num)?;
    debug!(class_num, count = passengers.len(), "filtered by class");
    Ok(Json(PassengerList { passengers }).into_response())
}

/// Router fallback
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
