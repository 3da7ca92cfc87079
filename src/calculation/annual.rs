//! Annual calculation for the salaried profile.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxConfig;
use crate::models::{
    AuditTrace, MonthlyFigures, SalariedInputs, TaxCalculationResult, total_deductions,
    total_reliefs,
};

use super::brackets::apply_brackets;
use super::common::{
    MONTHS_PER_YEAR, amount_str, effective_rate, record_brackets, record_reliefs,
    record_taxable_income,
};
use super::reliefs::{salaried_deductions, salaried_reliefs};

/// Calculates the full annual result for a salaried worker.
///
/// Gross income is the monthly figure times twelve. Toggled deductions and
/// rent relief are subtracted (floored at zero) before bracket application,
/// and the monthly figures are the annual tax spread evenly over twelve months.
///
/// # Examples
///
/// ```no_run
/// use income_tax_engine::calculation::calculate_salaried;
/// use income_tax_engine::config::ConfigLoader;
/// use income_tax_engine::models::SalariedInputs;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/nta2025").unwrap().into_config();
/// let inputs = SalariedInputs {
///     monthly_gross_income: Decimal::new(300_000, 0),
///     annual_rent: Decimal::ZERO,
///     include_pension: false,
///     include_housing_fund: false,
///     include_health_insurance: false,
/// };
///
/// let result = calculate_salaried(&inputs, &config);
/// assert_eq!(result.annual_tax, Decimal::new(438_000, 0));
/// ```
pub fn calculate_salaried(inputs: &SalariedInputs, config: &TaxConfig) -> TaxCalculationResult {
    let mut trace = AuditTrace::default();
    let regime = config.regime().name.as_str();

    let annual_gross_income = inputs.monthly_gross_income * MONTHS_PER_YEAR;
    trace.push_step(
        "annual_gross",
        "Annual Gross Income",
        regime,
        serde_json::json!({ "monthly_gross_income": amount_str(inputs.monthly_gross_income) }),
        serde_json::json!({ "annual_gross_income": amount_str(annual_gross_income) }),
        format!(
            "₦{} × 12 = ₦{}",
            amount_str(inputs.monthly_gross_income),
            amount_str(annual_gross_income)
        ),
    );

    let annual_deductions = salaried_deductions(inputs, config.reliefs());
    let total_annual_deductions = total_deductions(&annual_deductions);
    if !annual_deductions.is_empty() {
        let items: Vec<serde_json::Value> = annual_deductions
            .iter()
            .map(|d| {
                serde_json::json!({
                    "label": d.label,
                    "annual_amount": amount_str(d.annual_amount),
                    "monthly_amount": amount_str(d.monthly_amount)
                })
            })
            .collect();
        trace.push_step(
            "salaried_deductions",
            "Salaried Deductions",
            regime,
            serde_json::json!({
                "annual_gross_income": amount_str(annual_gross_income),
                "include_pension": inputs.include_pension,
                "include_housing_fund": inputs.include_housing_fund,
                "include_health_insurance": inputs.include_health_insurance
            }),
            serde_json::json!({
                "deductions": items,
                "total": amount_str(total_annual_deductions)
            }),
            format!(
                "{} deduction(s) totalling ₦{}",
                annual_deductions.len(),
                amount_str(total_annual_deductions)
            ),
        );
    }

    let annual_reliefs = salaried_reliefs(inputs, config.reliefs());
    let total_annual_reliefs = total_reliefs(&annual_reliefs);
    record_reliefs(&mut trace, "annual", &annual_reliefs);

    let annual_taxable_income = record_taxable_income(
        &mut trace,
        "annual",
        regime,
        annual_gross_income,
        total_annual_deductions + total_annual_reliefs,
    );

    let application = apply_brackets(annual_taxable_income, config.brackets());
    record_brackets(
        &mut trace,
        "annual",
        regime,
        annual_taxable_income,
        &application,
    );
    let annual_tax = application.tax;

    let monthly_tax = annual_tax / MONTHS_PER_YEAR;
    let monthly = MonthlyFigures {
        gross_income: inputs.monthly_gross_income,
        tax: monthly_tax,
        net_income: inputs.monthly_gross_income - monthly_tax,
    };
    trace.push_step(
        "monthly_equivalent",
        "Monthly Equivalent",
        regime,
        serde_json::json!({ "annual_tax": amount_str(annual_tax) }),
        serde_json::json!({
            "monthly_tax": amount_str(monthly.tax),
            "monthly_net_income": amount_str(monthly.net_income)
        }),
        format!(
            "₦{} / 12 = ₦{} per month",
            amount_str(annual_tax),
            amount_str(monthly.tax)
        ),
    );

    debug!(
        annual_gross = %annual_gross_income,
        taxable = %annual_taxable_income,
        tax = %annual_tax,
        "Salaried calculation complete"
    );

    TaxCalculationResult {
        annual_gross_income,
        annual_deductions,
        total_annual_deductions,
        annual_reliefs,
        total_annual_reliefs,
        annual_taxable_income,
        annual_tax,
        band_breakdown: application.band_breakdown,
        effective_rate: effective_rate(annual_tax, annual_gross_income),
        monthly: Some(monthly),
        ytd: None,
        audit_trace: trace,
    }
}
