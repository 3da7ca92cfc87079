//! Core data models for the income tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod currency;
mod inputs;
mod month;
mod monthly_log;
mod relief;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BandResult, MonthlyFigures, MonthlyTaxRow,
    TaxCalculationResult, YtdFigures,
};
pub use currency::Currency;
pub use inputs::{MAX_AMOUNT, MAX_EXCHANGE_RATE, SalariedInputs, TaxInputs, VariableIncomeInputs};
pub use month::{Month, MonthlyAmounts};
pub use monthly_log::{CurrencyPreference, MonthlyLog};
pub use relief::{DeductionItem, ReliefItem, total_deductions, total_reliefs};
