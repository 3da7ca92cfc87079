//! Calculation logic for the income tax engine.
//!
//! This module contains the progressive bracket engine, the relief and
//! deduction rules, currency conversion, and the two aggregators: the annual
//! calculation for salaried workers and the year-to-date calculation for
//! variable-income workers.
//!
//! Every function here is pure: results depend only on the inputs and the
//! immutable [`TaxConfig`], and none of them fail.

mod annual;
mod brackets;
mod common;
mod currency;
mod reliefs;
mod ytd;

use tracing::debug;

use crate::config::TaxConfig;
use crate::models::{TaxCalculationResult, TaxInputs};

pub use annual::calculate_salaried;
pub use brackets::{BracketApplication, apply_brackets};
pub use common::{effective_rate, floor_at_zero};
pub use currency::{conversion_rate, convert, convert_months, default_rate};
pub use reliefs::{
    VariableIncomeReliefs, rent_relief, salaried_deductions, salaried_reliefs,
    variable_income_reliefs,
};
pub use ytd::{MonthlyBreakdown, calculate_variable_income, monthly_breakdown};

/// Calculates tax for either profile.
///
/// Dispatches to [`calculate_salaried`] or [`calculate_variable_income`].
/// Inputs are assumed non-negative; see [`TaxInputs::validate`].
///
/// # Examples
///
/// ```no_run
/// use income_tax_engine::calculation::calculate_tax;
/// use income_tax_engine::config::ConfigLoader;
/// use income_tax_engine::models::TaxInputs;
///
/// let config = ConfigLoader::load("./config/nta2025").unwrap().into_config();
/// let inputs: TaxInputs = serde_json::from_str(
///     r#"{ "employment_type": "salaried", "monthly_gross_income": "300000" }"#,
/// )
/// .unwrap();
///
/// let result = calculate_tax(&inputs, &config);
/// println!("Annual tax: {}", result.annual_tax);
/// ```
pub fn calculate_tax(inputs: &TaxInputs, config: &TaxConfig) -> TaxCalculationResult {
    debug!(profile = inputs.profile(), "Calculating tax");

    match inputs {
        TaxInputs::Salaried(salaried) => calculate_salaried(salaried, config),
        TaxInputs::VariableIncome(variable) => calculate_variable_income(variable, config),
    }
}
