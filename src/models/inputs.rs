//! Calculation inputs for the two taxpayer profiles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Currency, Month, MonthlyAmounts};

/// Largest accepted monetary input (10^15), per month or per year.
///
/// With [`MAX_EXCHANGE_RATE`] this keeps twelve converted months well inside
/// `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest accepted exchange rate, in local units per foreign unit.
pub const MAX_EXCHANGE_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Inputs for a salaried worker with a fixed monthly income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalariedInputs {
    /// Fixed gross income per month.
    pub monthly_gross_income: Decimal,
    /// Full rent paid over the year.
    #[serde(default)]
    pub annual_rent: Decimal,
    /// Deduct the pension contribution.
    #[serde(default)]
    pub include_pension: bool,
    /// Deduct the housing-fund contribution.
    #[serde(default)]
    pub include_housing_fund: bool,
    /// Deduct the health-insurance contribution.
    #[serde(default)]
    pub include_health_insurance: bool,
}

/// Inputs for a self-employed worker whose income varies month to month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableIncomeInputs {
    /// Income per month, in `income_currency`.
    #[serde(default)]
    pub monthly_incomes: MonthlyAmounts,
    /// Deductible work expenses per month, in the local unit.
    #[serde(default)]
    pub monthly_expenses: MonthlyAmounts,
    /// The last month for which data exists.
    pub current_month: Month,
    /// The currency income is logged in.
    #[serde(default)]
    pub income_currency: Currency,
    /// Units of local currency per unit of `income_currency`.
    ///
    /// When absent, the configured default rate for the currency applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    /// Full rent paid over the year.
    #[serde(default)]
    pub annual_rent: Decimal,
}

impl VariableIncomeInputs {
    /// Returns the number of months from January through `current_month`.
    pub fn months_elapsed(&self) -> u32 {
        self.current_month.index() as u32 + 1
    }
}

/// The input record for one calculation, tagged by profile.
///
/// # Example
///
/// ```
/// use income_tax_engine::models::TaxInputs;
///
/// let json = r#"{
///     "employment_type": "salaried",
///     "monthly_gross_income": "300000"
/// }"#;
/// let inputs: TaxInputs = serde_json::from_str(json).unwrap();
/// assert!(matches!(inputs, TaxInputs::Salaried(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "employment_type", rename_all = "snake_case")]
pub enum TaxInputs {
    /// A salaried worker.
    Salaried(SalariedInputs),
    /// A self-employed worker with a monthly log.
    VariableIncome(VariableIncomeInputs),
}

impl TaxInputs {
    /// Returns the profile tag used in logs and audit steps.
    pub fn profile(&self) -> &'static str {
        match self {
            TaxInputs::Salaried(_) => "salaried",
            TaxInputs::VariableIncome(_) => "variable_income",
        }
    }

    /// Rejects negative or oversized amounts and out-of-range exchange rates.
    ///
    /// The calculation functions assume already-clamped input; callers
    /// accepting raw data (such as the HTTP layer) check it here first.
    /// Amounts above [`MAX_AMOUNT`] and rates above [`MAX_EXCHANGE_RATE`]
    /// are rejected so that no calculation can overflow.
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            TaxInputs::Salaried(inputs) => {
                ensure_amount("monthly_gross_income", inputs.monthly_gross_income)?;
                ensure_amount("annual_rent", inputs.annual_rent)
            }
            TaxInputs::VariableIncome(inputs) => {
                ensure_months("monthly_incomes", &inputs.monthly_incomes)?;
                ensure_months("monthly_expenses", &inputs.monthly_expenses)?;
                if let Some(rate) = inputs.exchange_rate {
                    ensure_rate(rate)?;
                }
                ensure_amount("annual_rent", inputs.annual_rent)
            }
        }
    }
}

fn ensure_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {} (got {})", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

fn ensure_months(field: &str, amounts: &MonthlyAmounts) -> EngineResult<()> {
    for (month, amount) in amounts.iter() {
        ensure_amount(&format!("{}.{}", field, month.name().to_lowercase()), amount)?;
    }
    Ok(())
}

fn ensure_rate(rate: Decimal) -> EngineResult<()> {
    if rate <= Decimal::ZERO || rate > MAX_EXCHANGE_RATE {
        return Err(EngineError::InvalidInput {
            field: "exchange_rate".to_string(),
            message: format!(
                "must be greater than zero and at most {} (got {})",
                MAX_EXCHANGE_RATE, rate
            ),
        });
    }
    Ok(())
}
