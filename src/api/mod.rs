//! HTTP API module for the income tax engine.
//!
//! This module provides the REST API endpoints for calculating tax, splitting
//! amounts across the bands, listing currencies, and persisting the monthly
//! log between sessions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::BracketsRequest;
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, CurrenciesResponse, CurrencyRate,
};
pub use state::AppState;
