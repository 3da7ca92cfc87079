//! The persisted monthly income/expense log and currency preference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, Month, MonthlyAmounts, VariableIncomeInputs};

/// The currency a variable-income taxpayer logs income in, and the rate used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPreference {
    /// The currency income is logged in.
    #[serde(default)]
    pub income_currency: Currency,
    /// Units of local currency per unit of `income_currency`; `None` uses
    /// the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}

/// The user-entered monthly figures kept between sessions.
///
/// Every field defaults, so a partially written record (for example one saved
/// before expenses were tracked) still loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLog {
    /// Income per month, in the preferred currency.
    #[serde(default)]
    pub incomes: MonthlyAmounts,
    /// Work expenses per month, in the local unit.
    #[serde(default)]
    pub expenses: MonthlyAmounts,
    /// Currency preference.
    #[serde(default)]
    pub currency: CurrencyPreference,
}

impl MonthlyLog {
    /// Builds calculation inputs from the log.
    ///
    /// # Examples
    ///
    /// ```
    /// use income_tax_engine::models::{Month, MonthlyLog};
    /// use rust_decimal::Decimal;
    ///
    /// let log = MonthlyLog::default();
    /// let inputs = log.into_inputs(Month::Mar, Decimal::ZERO);
    /// assert_eq!(inputs.months_elapsed(), 3);
    /// ```
    pub fn into_inputs(self, current_month: Month, annual_rent: Decimal) -> VariableIncomeInputs {
        VariableIncomeInputs {
            monthly_incomes: self.incomes,
            monthly_expenses: self.expenses,
            current_month,
            income_currency: self.currency.income_currency,
            exchange_rate: self.currency.exchange_rate,
            annual_rent,
        }
    }
}
