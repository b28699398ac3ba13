//! HTTP request handlers for the Take-Home Pay Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_take_home;
use crate::models::{AuditTrace, CalculationResult, SalaryInput};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, PrefectureListResponse};
use super::state::AppState;

/// Version reported in every calculation result.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/prefectures", get(prefectures_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Validates the request, runs the pipeline and wraps the breakdown in a
/// [`CalculationResult`] with its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
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
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let input: SalaryInput = request.into();
    if let Err(err) = input.validate() {
        warn!(
            correlation_id = %correlation_id,
            monthly_salary = %input.monthly_salary,
            error = %err,
            "Request rejected"
        );
        let api_error: ApiErrorResponse = err.into();
        return (
            api_error.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(api_error.error),
        )
            .into_response();
    }

    let tables = state.tables();
    let start_time = Instant::now();
    let calculation = calculate_take_home(&input, tables);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        monthly_salary = %input.monthly_salary,
        prefecture = %calculation.breakdown.prefecture_code,
        used_default_prefecture = calculation.breakdown.used_default_prefecture,
        monthly_take_home = %calculation.breakdown.monthly_take_home,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    let deduction_shares = calculation.breakdown.deduction_shares();
    let result = CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        tables_revision: tables.metadata().revision.clone(),
        breakdown: calculation.breakdown,
        deduction_shares,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us: duration.as_micros() as u64,
        },
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Handler for GET /prefectures endpoint.
///
/// Lists every prefecture with its health insurance rate.
async fn prefectures_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(PrefectureListResponse::from(state.tables().prefectures()))
}
