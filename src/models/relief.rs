//! Reliefs and deductions subtracted from gross income before bracket application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A relief granted for a qualifying expense category (rent, work expenses).
///
/// `annual_amount` and `monthly_amount` are independent figures. A YTD relief
/// carries the summed year-to-date amount in `annual_amount` while
/// `monthly_amount` holds the monthly average, so the two are never assumed to
/// differ by a factor of twelve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefItem {
    /// Display label (e.g., "Rent Relief").
    pub label: String,
    /// The amount subtracted from the scope's gross income.
    pub annual_amount: Decimal,
    /// The per-month figure shown alongside.
    pub monthly_amount: Decimal,
    /// Statutory source of the relief (e.g., "NTA 2025 §30(vi)").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A pension, housing-fund, or health-insurance contribution.
///
/// Deductions apply to the salaried profile only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionItem {
    /// Display label (e.g., "Pension (8%)").
    pub label: String,
    /// The annual contribution.
    pub annual_amount: Decimal,
    /// The monthly contribution.
    pub monthly_amount: Decimal,
    /// The share of annual gross income contributed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
}

/// Sums the `annual_amount` of every relief.
pub fn total_reliefs(reliefs: &[ReliefItem]) -> Decimal {
    reliefs.iter().map(|r| r.annual_amount).sum()
}

/// Sums the `annual_amount` of every deduction.
pub fn total_deductions(deductions: &[DeductionItem]) -> Decimal {
    deductions.iter().map(|d| d.annual_amount).sum()
}
