//! Integration tests for the income tax engine HTTP API.
//!
//! These tests drive the router against the shipped `config/nta2025` files:
//! - Salaried calculations (deductions, rent relief, monthly figures)
//! - Variable-income calculations (YTD, projection, monthly breakdown)
//! - Foreign-currency income
//! - Bracket splitting and the currency listing
//! - Monthly log persistence
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use income_tax_engine::api::{AppState, create_router};
use income_tax_engine::config::ConfigLoader;
use income_tax_engine::storage::{InMemoryStore, JsonFileStore, MonthlyLogStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/nta2025").expect("Failed to load config");
    AppState::new(config.into_config(), Arc::new(InMemoryStore::default()))
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, "POST", "/calculate", Some(body)).await
}

fn salaried_request(monthly_gross: &str, annual_rent: &str) -> Value {
    json!({
        "employment_type": "salaried",
        "monthly_gross_income": monthly_gross,
        "annual_rent": annual_rent
    })
}

fn variable_request(incomes: Value, expenses: Value, current_month: &str) -> Value {
    json!({
        "employment_type": "variable_income",
        "monthly_incomes": incomes,
        "monthly_expenses": expenses,
        "current_month": current_month
    })
}

fn assert_amount(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// SECTION 1: Salaried Profile
// =============================================================================

#[tokio::test]
async fn test_salaried_300k_per_month_no_reliefs() {
    let (status, body) =
        post_calculate(create_router_for_test(), salaried_request("300000", "0")).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_amount(&result["annual_gross_income"], "3600000");
    assert_amount(&result["annual_taxable_income"], "3600000");
    assert_amount(&result["band_breakdown"][0]["tax_in_band"], "0");
    assert_amount(&result["band_breakdown"][1]["tax_in_band"], "330000");
    assert_amount(&result["band_breakdown"][2]["tax_in_band"], "108000");
    assert_amount(&result["annual_tax"], "438000");
    assert_amount(&result["monthly"]["tax"], "36500");
    assert_amount(&result["monthly"]["net_income"], "263500");
    assert!(result.get("ytd").is_none());
}

#[tokio::test]
async fn test_salaried_rent_relief_of_240k() {
    let (status, body) =
        post_calculate(create_router_for_test(), salaried_request("300000", "1200000")).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["annual_reliefs"][0]["label"], "Rent Relief");
    assert_eq!(result["annual_reliefs"][0]["source"], "NTA 2025 §30(vi)");
    assert_amount(&result["annual_reliefs"][0]["annual_amount"], "240000");
    assert_amount(&result["annual_taxable_income"], "3360000");
}

#[tokio::test]
async fn test_salaried_rent_relief_is_capped() {
    let (_, body) =
        post_calculate(create_router_for_test(), salaried_request("800000", "4000000")).await;

    assert_amount(&body["result"]["total_annual_reliefs"], "500000");
}

#[tokio::test]
async fn test_salaried_all_deductions() {
    let request = json!({
        "employment_type": "salaried",
        "monthly_gross_income": "300000",
        "include_pension": true,
        "include_housing_fund": true,
        "include_health_insurance": true
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let deductions = body["result"]["annual_deductions"].as_array().unwrap();
    let labels: Vec<&str> = deductions.iter().map(|d| d["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Pension (8%)", "NHF (2.5%)", "NHIS (1.75%)"]);
    assert_amount(&body["result"]["total_annual_deductions"], "441000");
    assert_amount(&body["result"]["annual_tax"], "358620");
}

#[tokio::test]
async fn test_salaried_reliefs_exceeding_income_warns() {
    let (status, body) =
        post_calculate(create_router_for_test(), salaried_request("20000", "3000000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&body["result"]["annual_tax"], "0");
    assert_eq!(
        body["result"]["audit_trace"]["warnings"][0]["code"],
        "RELIEFS_EXCEED_INCOME"
    );
}

#[tokio::test]
async fn test_salaried_audit_trace_is_numbered() {
    let (_, body) =
        post_calculate(create_router_for_test(), salaried_request("300000", "0")).await;

    let steps = body["result"]["audit_trace"]["steps"].as_array().unwrap();
    assert!(!steps.is_empty());
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], json!(i + 1));
    }
}

// =============================================================================
// SECTION 2: Variable-Income Profile
// =============================================================================

#[tokio::test]
async fn test_variable_two_months_of_500k() {
    let request = variable_request(
        json!({ "jan": "500000", "feb": "500000" }),
        json!({}),
        "feb",
    );

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let ytd = &body["result"]["ytd"];
    assert_eq!(ytd["months_elapsed"], 2);
    assert_amount(&ytd["gross_income"], "1000000");
    assert_amount(&ytd["tax_owed"], "30000");
    assert_eq!(ytd["monthly_breakdown"][0]["month"], "jan");
    assert_amount(&ytd["monthly_breakdown"][0]["tax_owed"], "0");
    assert_eq!(ytd["monthly_breakdown"][1]["month"], "feb");
    assert_amount(&ytd["monthly_breakdown"][1]["tax_owed"], "30000");
    assert_amount(&body["result"]["effective_rate"], "0.03");
    assert!(body["result"].get("monthly").is_none());
}

#[tokio::test]
async fn test_variable_projection_fills_annual_fields() {
    let request = variable_request(
        json!({ "jan": "500000", "feb": "500000" }),
        json!({}),
        "feb",
    );

    let (_, body) = post_calculate(create_router_for_test(), request).await;

    let result = &body["result"];
    assert_amount(&result["annual_gross_income"], "6000000");
    assert_amount(&result["annual_tax"], "870000");
    assert_amount(&result["ytd"]["projected_annual_tax"], "870000");
    // The displayed breakdown is the YTD split, not the projection.
    assert_amount(&result["band_breakdown"][1]["taxable_in_band"], "200000");
}

#[tokio::test]
async fn test_variable_all_zero_input() {
    let request = variable_request(json!({}), json!({}), "dec");

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_amount(&result["ytd"]["gross_income"], "0");
    assert_amount(&result["effective_rate"], "0");
    assert!(result["ytd"]["monthly_breakdown"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_variable_work_expenses_relief() {
    let request = variable_request(
        json!({ "jan": "600000", "feb": "600000" }),
        json!({ "jan": "50000", "feb": "150000" }),
        "feb",
    );

    let (_, body) = post_calculate(create_router_for_test(), request).await;

    let ytd = &body["result"]["ytd"];
    assert_eq!(ytd["reliefs"][0]["label"], "Work Expenses (YTD)");
    assert_eq!(ytd["reliefs"][0]["source"], "NTA 2025 §20");
    assert_amount(&ytd["reliefs"][0]["annual_amount"], "200000");
    assert_amount(&ytd["taxable_income"], "1000000");
    assert_eq!(body["result"]["annual_reliefs"][0]["label"], "Work Expenses");
    assert_amount(&body["result"]["annual_reliefs"][0]["annual_amount"], "1200000");
}

#[tokio::test]
async fn test_variable_monthly_rows_sum_to_ytd_tax() {
    let request = variable_request(
        json!({
            "jan": "450000", "feb": "1250000", "mar": "0", "apr": "3100000",
            "may": "800000", "jun": "2200000"
        }),
        json!({ "feb": "100000", "may": "50000" }),
        "jun",
    );

    let (_, body) = post_calculate(create_router_for_test(), request).await;

    let ytd = &body["result"]["ytd"];
    let rows = ytd["monthly_breakdown"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    let total: Decimal = rows
        .iter()
        .map(|row| decimal(row["tax_owed"].as_str().unwrap()))
        .sum();
    assert_eq!(total, decimal(ytd["tax_owed"].as_str().unwrap()));
}

// =============================================================================
// SECTION 3: Foreign Currency
// =============================================================================

#[tokio::test]
async fn test_usd_income_converted_at_supplied_rate() {
    let request = json!({
        "employment_type": "variable_income",
        "monthly_incomes": { "jan": "1000", "feb": "2000" },
        "current_month": "feb",
        "income_currency": "USD",
        "exchange_rate": "1500"
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let ytd = &body["result"]["ytd"];
    assert_amount(&ytd["gross_income"], "4500000");
    assert_amount(&ytd["monthly_breakdown"][1]["gross_income"], "3000000");
    assert_amount(&ytd["tax_owed"], "600000");
}

#[tokio::test]
async fn test_usd_income_without_rate_uses_default_rate() {
    let request = json!({
        "employment_type": "variable_income",
        "monthly_incomes": { "jan": "1000" },
        "current_month": "jan",
        "income_currency": "USD"
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let ytd = &body["result"]["ytd"];
    assert_amount(&ytd["gross_income"], "1550000");
    assert_amount(&ytd["tax_owed"], "112500");
}

#[tokio::test]
async fn test_local_currency_ignores_exchange_rate() {
    let request = json!({
        "employment_type": "variable_income",
        "monthly_incomes": { "jan": "1000000" },
        "current_month": "jan",
        "income_currency": "NGN",
        "exchange_rate": "1550"
    });

    let (_, body) = post_calculate(create_router_for_test(), request).await;

    assert_amount(&body["result"]["ytd"]["gross_income"], "1000000");
}

#[tokio::test]
async fn test_currencies_endpoint_lists_default_rates() {
    let (status, body) = send(create_router_for_test(), "GET", "/currencies", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["local_currency"], "NGN");
    let currencies = body["currencies"].as_array().unwrap();
    let codes: Vec<&str> = currencies
        .iter()
        .map(|c| c["currency"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["NGN", "USD", "GBP", "EUR"]);
    assert_amount(&currencies[0]["default_rate"], "1");
}

// =============================================================================
// SECTION 4: Bracket Splitting
// =============================================================================

#[tokio::test]
async fn test_brackets_endpoint_zero_income() {
    let (status, body) = send(
        create_router_for_test(),
        "POST",
        "/brackets",
        Some(json!({ "taxable_income": "0" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let bands = body["band_breakdown"].as_array().unwrap();
    assert_eq!(bands.len(), 6);
    assert_amount(&body["tax"], "0");
}

#[tokio::test]
async fn test_brackets_endpoint_top_band() {
    let (_, body) = send(
        create_router_for_test(),
        "POST",
        "/brackets",
        Some(json!({ "taxable_income": "60000000" })),
    )
    .await;

    assert_eq!(body["band_breakdown"][5]["label"], "Above ₦50m");
    assert_amount(&body["band_breakdown"][5]["taxable_in_band"], "10000000");
    assert_amount(&body["tax"], "12930000");
}

// =============================================================================
// SECTION 5: Monthly Log Persistence
// =============================================================================

#[tokio::test]
async fn test_log_defaults_to_empty() {
    let (status, body) = send(create_router_for_test(), "GET", "/log", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"]["income_currency"], "NGN");
    assert_amount(&body["incomes"]["jan"], "0");
}

#[tokio::test]
async fn test_log_persists_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monthly_log.json");
    let config = ConfigLoader::load("./config/nta2025").unwrap().into_config();
    let state = AppState::new(config, Arc::new(JsonFileStore::new(&path)));

    let log = json!({
        "incomes": { "jan": "1200", "feb": "900" },
        "expenses": { "feb": "45000" },
        "currency": { "income_currency": "EUR", "exchange_rate": "1700" }
    });
    let (status, _) = send(create_router(state.clone()), "PUT", "/log", Some(log)).await;
    assert_eq!(status, StatusCode::OK);

    // A fresh store over the same file sees the saved log.
    let reloaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(reloaded.incomes[income_tax_engine::models::Month::Feb], decimal("900"));

    let (status, body) = send(create_router(state), "GET", "/log", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"]["income_currency"], "EUR");
    assert_amount(&body["expenses"]["feb"], "45000");
}

// =============================================================================
// SECTION 6: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"employment_type\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_employment_type_returns_400() {
    let request = json!({ "employment_type": "retired", "monthly_gross_income": "1" });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_current_month_returns_validation_error() {
    let request = json!({ "employment_type": "variable_income", "monthly_incomes": {} });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_rent_returns_invalid_input() {
    let (status, body) =
        post_calculate(create_router_for_test(), salaried_request("300000", "-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("annual_rent"));
}

#[tokio::test]
async fn test_zero_exchange_rate_returns_invalid_input() {
    let request = json!({
        "employment_type": "variable_income",
        "current_month": "jan",
        "income_currency": "GBP",
        "exchange_rate": "0"
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_salary_above_ceiling_returns_invalid_input() {
    let (status, body) = post_calculate(
        create_router_for_test(),
        salaried_request("7000000000000000000000000000", "0"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("monthly_gross_income"));
}

#[tokio::test]
async fn test_oversized_foreign_income_returns_invalid_input() {
    let request = json!({
        "employment_type": "variable_income",
        "monthly_incomes": { "jan": "100000000000000000000" },
        "current_month": "jan",
        "income_currency": "USD",
        "exchange_rate": "1000000000000"
    });

    let (status, body) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unknown_month_key_returns_400() {
    let request = variable_request(json!({ "smarch": "1000" }), json!({}), "jan");

    let (status, _) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
