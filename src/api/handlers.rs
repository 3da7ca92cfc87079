//! HTTP request handlers for the income tax engine API.
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
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{apply_brackets, calculate_tax, default_rate};
use crate::models::{Currency, Month, MonthlyLog, TaxInputs};

use super::request::BracketsRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, CurrenciesResponse, CurrencyRate,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/brackets", post(brackets_handler))
        .route("/currencies", get(currencies_handler))
        .route("/log", get(get_log_handler).put(put_log_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts tax inputs for either profile and returns the calculation result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxInputs>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let inputs = match payload {
        Ok(Json(inputs)) => inputs,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = inputs.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Rejected calculation inputs"
        );
        return error_response(err.into());
    }

    let start_time = Instant::now();
    let result = calculate_tax(&inputs, state.config());
    info!(
        correlation_id = %correlation_id,
        profile = inputs.profile(),
        annual_tax = %result.annual_tax,
        warnings = result.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse::new(&state.config().regime().code, result),
    )
}

/// Handler for POST /brackets endpoint.
///
/// Splits a taxable amount across the configured bands.
async fn brackets_handler(
    State(state): State<AppState>,
    payload: Result<Json<BracketsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let application = apply_brackets(request.taxable_income, state.config().brackets());
    info!(
        correlation_id = %correlation_id,
        taxable_income = %request.taxable_income,
        tax = %application.tax,
        "Applied brackets"
    );

    json_response(StatusCode::OK, application)
}

/// Handler for GET /currencies endpoint.
///
/// Lists the supported income currencies with their default rates.
async fn currencies_handler(State(state): State<AppState>) -> Response {
    let table = state.config().currencies();

    let mut currencies = Vec::with_capacity(Currency::ALL.len());
    for currency in Currency::ALL {
        match default_rate(currency, table) {
            Ok(rate) => currencies.push(CurrencyRate {
                currency,
                symbol: currency.symbol().to_string(),
                default_rate: rate,
            }),
            Err(err) => return error_response(err.into()),
        }
    }

    json_response(
        StatusCode::OK,
        CurrenciesResponse {
            local_currency: table.local_currency,
            currencies,
        },
    )
}

/// Handler for GET /log endpoint.
///
/// Returns the persisted monthly log, or the empty log if none was saved.
async fn get_log_handler(State(state): State<AppState>) -> Response {
    match state.store().load() {
        Ok(log) => json_response(StatusCode::OK, log),
        Err(err) => {
            warn!(error = %err, "Failed to load monthly log");
            error_response(err.into())
        }
    }
}

/// Handler for PUT /log endpoint.
///
/// Replaces the persisted monthly log and echoes it back.
async fn put_log_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyLog>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let log = match payload {
        Ok(Json(log)) => log,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    // The log carries the same amounts and rate as variable-income inputs.
    let as_inputs = TaxInputs::VariableIncome(log.into_inputs(Month::Dec, Decimal::ZERO));
    if let Err(err) = as_inputs.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Rejected monthly log"
        );
        return error_response(err.into());
    }

    match state.store().save(&log) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, "Saved monthly log");
            json_response(StatusCode::OK, log)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Failed to save monthly log"
            );
            error_response(err.into())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

    error_response(ApiErrorResponse::bad_request(error))
}
