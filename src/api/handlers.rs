//! HTTP request handlers for the daily calculation API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::DayPlan;

use super::request::{CalculateDayRequest, CalculateRangeRequest};
use super::response::{ApiError, ApiErrorResponse, RangeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate/day", post(calculate_day_handler))
        .route("/calculate/range", post(calculate_range_handler))
        .route("/day-plans", get(list_day_plans_handler))
        .with_state(state)
}

/// Handler for POST /calculate/day.
///
/// Returns the committed daily value, or 204 when the day was skipped.
async fn calculate_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateDayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day calculation request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    match state
        .service()
        .calculate_day(request.tenant_id, request.employee_id, request.date)
        .await
    {
        Ok(Some(value)) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                net_time = value.net_time,
                has_error = value.has_error,
                duration_us = start_time.elapsed().as_micros(),
                "Day calculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(value),
            )
                .into_response()
        }
        Ok(None) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                "Day skipped"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Day calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /calculate/range.
async fn calculate_range_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRangeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing range recalculation request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    match state
        .service()
        .recalculate_range(
            request.tenant_id,
            request.employee_id,
            request.from,
            request.to,
        )
        .await
    {
        Ok(days_calculated) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                days_calculated,
                duration_us = start_time.elapsed().as_micros(),
                "Range recalculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(RangeResponse { days_calculated }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Range recalculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /day-plans.
async fn list_day_plans_handler(State(state): State<AppState>) -> Json<Vec<DayPlan>> {
    Json(state.config().catalog().iter().cloned().collect())
}

/// Maps a JSON extraction failure to a 400 response.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}
