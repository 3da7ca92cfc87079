//! Currency conversion into the local unit.
//!
//! One exchange rate applies to every month of a calculation; per-month
//! historical rates are not modelled.

use rust_decimal::Decimal;

use crate::config::CurrencyTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, Month, MonthlyAmounts};

/// Returns the configured default rate for `currency`.
///
/// The local currency always converts at 1.
pub fn default_rate(currency: Currency, table: &CurrencyTable) -> EngineResult<Decimal> {
    if currency == table.local_currency {
        return Ok(Decimal::ONE);
    }

    table
        .default_rates
        .get(&currency)
        .copied()
        .ok_or_else(|| EngineError::UnknownCurrency {
            code: currency.code().to_string(),
        })
}

/// Returns the rate actually applied to `currency`.
///
/// The table's local currency always converts at 1. A foreign currency uses
/// the supplied rate, falling back to its configured default when none was
/// given.
///
/// # Examples
///
/// ```no_run
/// use income_tax_engine::calculation::conversion_rate;
/// use income_tax_engine::config::ConfigLoader;
/// use income_tax_engine::models::Currency;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/nta2025")?.into_config();
/// let table = config.currencies();
///
/// let supplied = conversion_rate(Currency::Usd, Some(Decimal::new(1500, 0)), table)?;
/// assert_eq!(supplied, Decimal::new(1500, 0));
///
/// let defaulted = conversion_rate(Currency::Usd, None, table)?;
/// assert_eq!(defaulted, Decimal::new(1550, 0));
/// # Ok::<(), income_tax_engine::error::EngineError>(())
/// ```
pub fn conversion_rate(
    currency: Currency,
    supplied_rate: Option<Decimal>,
    table: &CurrencyTable,
) -> EngineResult<Decimal> {
    if currency == table.local_currency {
        return Ok(Decimal::ONE);
    }

    match supplied_rate {
        Some(rate) => Ok(rate),
        None => default_rate(currency, table),
    }
}

/// Converts an amount to the local unit at an already-resolved `rate`.
///
/// # Examples
///
/// ```
/// use income_tax_engine::calculation::convert;
/// use rust_decimal::Decimal;
///
/// let ngn = convert(Decimal::new(1000, 0), Decimal::new(1550, 0));
/// assert_eq!(ngn, Decimal::new(1_550_000, 0));
/// ```
pub fn convert(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

/// Converts every month from January through `through` into the local unit.
///
/// Later months are left at zero.
pub fn convert_months(amounts: &MonthlyAmounts, through: Month, rate: Decimal) -> MonthlyAmounts {
    through
        .elapsed()
        .iter()
        .fold(MonthlyAmounts::zero(), |converted, &month| {
            converted.with(month, convert(amounts[month], rate))
        })
}
