//! Request types for the income tax engine API.
//!
//! `POST /calculate` takes a [`TaxInputs`](crate::models::TaxInputs) body and
//! `PUT /log` a [`MonthlyLog`](crate::models::MonthlyLog) directly; the types
//! here cover the remaining endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for the `/brackets` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketsRequest {
    /// The annual taxable amount to split across the bands.
    pub taxable_income: Decimal,
}
