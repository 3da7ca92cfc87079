//! Calculation result models for the income tax engine.
//!
//! This module contains the [`TaxCalculationResult`] type and its associated
//! structures: the per-band breakdown, the profile-specific monthly and
//! year-to-date figures, and the audit trace recording every rule applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DeductionItem, Month, ReliefItem};

/// The share of taxable income falling into one bracket, and the tax on it.
///
/// # Example
///
/// ```
/// use income_tax_engine::models::BandResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let band = BandResult {
///     label: "₦800k – ₦3m".to_string(),
///     rate: Decimal::from_str("0.15").unwrap(),
///     taxable_in_band: Decimal::from_str("2200000").unwrap(),
///     tax_in_band: Decimal::from_str("330000").unwrap(),
/// };
/// assert_eq!(band.taxable_in_band * band.rate, band.tax_in_band);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandResult {
    /// The bracket's display label.
    pub label: String,
    /// The bracket's rate.
    pub rate: Decimal,
    /// Income taxed in this band.
    pub taxable_in_band: Decimal,
    /// Tax owed on the income in this band.
    pub tax_in_band: Decimal,
}

/// One elapsed month in the variable-income breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTaxRow {
    /// The calendar month.
    pub month: Month,
    /// Income for the month, converted to the local unit.
    pub gross_income: Decimal,
    /// Work expenses logged for the month.
    pub expenses: Decimal,
    /// Marginal tax attributable to this month's cumulative progress.
    pub tax_owed: Decimal,
    /// `gross_income - tax_owed`.
    pub net_income: Decimal,
}

/// Monthly equivalents for the salaried profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFigures {
    /// Fixed gross income per month.
    pub gross_income: Decimal,
    /// Annual tax divided by twelve.
    pub tax: Decimal,
    /// Gross income less monthly tax.
    pub net_income: Decimal,
}

/// Year-to-date figures for the variable-income profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YtdFigures {
    /// Months from January through the current month.
    pub months_elapsed: u32,
    /// Income over the elapsed months, in the local unit.
    pub gross_income: Decimal,
    /// Reliefs applied to the YTD figure.
    pub reliefs: Vec<ReliefItem>,
    /// Sum of the YTD reliefs.
    pub total_reliefs: Decimal,
    /// `max(0, gross_income - total_reliefs)`.
    pub taxable_income: Decimal,
    /// Tax owed on the YTD taxable income.
    pub tax_owed: Decimal,
    /// `gross_income - tax_owed`.
    pub net_income: Decimal,
    /// Average monthly income extrapolated to twelve months.
    pub projected_annual_income: Decimal,
    /// Tax on the projected income after annual reliefs.
    pub projected_annual_tax: Decimal,
    /// Marginal tax per elapsed month with logged activity.
    pub monthly_breakdown: Vec<MonthlyTaxRow>,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory clause for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the number the next pushed step will carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Appends a step, numbering it after the existing steps.
    pub fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        clause_ref: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.next_step_number();
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            clause_ref: clause_ref.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// The complete result of a tax calculation, for either profile.
///
/// The annualized fields are always present. For the variable-income profile
/// they carry the full-year projection, and `band_breakdown` shows the
/// year-to-date bracket split. `monthly` is set only for the salaried profile
/// and `ytd` only for the variable-income profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// Annual (or projected annual) gross income.
    pub annual_gross_income: Decimal,
    /// Deductions applied (salaried only; empty otherwise).
    pub annual_deductions: Vec<DeductionItem>,
    /// Sum of `annual_deductions`.
    pub total_annual_deductions: Decimal,
    /// Reliefs applied to the annual figure.
    pub annual_reliefs: Vec<ReliefItem>,
    /// Sum of `annual_reliefs`.
    pub total_annual_reliefs: Decimal,
    /// Annual taxable income after deductions and reliefs.
    pub annual_taxable_income: Decimal,
    /// Annual (or projected annual) tax.
    pub annual_tax: Decimal,
    /// Per-band split of the displayed taxable figure.
    pub band_breakdown: Vec<BandResult>,
    /// Tax divided by gross income for the profile's scope.
    pub effective_rate: Decimal,
    /// Monthly equivalents, salaried only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<MonthlyFigures>,
    /// Year-to-date figures, variable income only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ytd: Option<YtdFigures>,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}
