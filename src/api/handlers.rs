//! HTTP request handlers for the household tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_household;
use crate::models::HouseholdInput;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
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
            ApiError::with_details("MALFORMED_JSON", "Invalid JSON syntax", err.to_string())
        }
        JsonRejection::MissingJsonContentType(_) => {
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::missing_content_type()
        }
        other => {
            warn!(
                correlation_id = %correlation_id,
                error = %other.body_text(),
                "Request body rejected"
            );
            ApiError::malformed_json("Failed to parse request body")
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a household and returns the calculated tax position.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(rejection_error(correlation_id, rejection))
                .into_response();
        }
    };

    let input: HouseholdInput = request.into();

    let start_time = Instant::now();
    let calculation = calculate_household(&input, state.config().config());
    let duration_us = start_time.elapsed().as_micros() as u64;

    for warning in &calculation.audit_trace.warnings {
        warn!(
            correlation_id = %correlation_id,
            code = %warning.code,
            "{}",
            warning.message
        );
    }

    info!(
        correlation_id = %correlation_id,
        is_couple = calculation.is_couple,
        investments = calculation.investments.len(),
        total_tax = %calculation.totals.total_tax,
        household_pay = %calculation.totals.household_pay,
        duration_us,
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse::new(calculation, duration_us),
    )
}
