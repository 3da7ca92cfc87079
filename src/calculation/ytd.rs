//! Year-to-date calculation for the variable-income profile.
//!
//! The YTD figure taxes income actually logged from January through the
//! current month. Alongside it the calculation projects the monthly average
//! over a full year, and attributes tax to each month as the increase in
//! cumulative liability that month caused.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{BracketTable, TaxConfig};
use crate::models::{
    AuditTrace, Month, MonthlyAmounts, MonthlyTaxRow, TaxCalculationResult, VariableIncomeInputs,
    YtdFigures, total_reliefs,
};

use super::brackets::apply_brackets;
use super::common::{
    MONTHS_PER_YEAR, amount_str, effective_rate, floor_at_zero, record_brackets, record_reliefs,
    record_taxable_income,
};
use super::currency::{conversion_rate, convert_months};
use super::reliefs::{rent_relief, variable_income_reliefs};

/// Per-month marginal tax over the elapsed months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBreakdown {
    /// Rows for months with logged income or expenses, in calendar order.
    pub rows: Vec<MonthlyTaxRow>,
    /// Months where cumulative tax fell and the row's tax was floored at zero.
    pub floored_months: Vec<Month>,
}

/// Attributes tax to each elapsed month.
///
/// Walking January through `through`, each month's cumulative taxable base is
/// `max(0, income so far - rent relief - expenses so far)`. The month's
/// `tax_owed` is the rise in tax on that base over the previous month, floored
/// at zero. Rent relief applies in full from January. Months with neither
/// income nor expenses produce no row.
///
/// `converted_incomes` must already be in the local unit.
pub fn monthly_breakdown(
    converted_incomes: &MonthlyAmounts,
    expenses: &MonthlyAmounts,
    through: Month,
    rent_relief: Decimal,
    table: &BracketTable,
) -> MonthlyBreakdown {
    let mut rows = Vec::new();
    let mut floored_months = Vec::new();
    let mut running_income = Decimal::ZERO;
    let mut running_expenses = Decimal::ZERO;
    let mut previous_tax = Decimal::ZERO;

    for &month in through.elapsed() {
        let income = converted_incomes[month];
        let expense = expenses[month];
        running_income += income;
        running_expenses += expense;

        let base = floor_at_zero(running_income - rent_relief - running_expenses);
        let cumulative_tax = apply_brackets(base, table).tax;
        let delta = cumulative_tax - previous_tax;
        previous_tax = cumulative_tax;

        if delta < Decimal::ZERO {
            floored_months.push(month);
        }

        if income.is_zero() && expense.is_zero() {
            continue;
        }

        let tax_owed = floor_at_zero(delta);
        rows.push(MonthlyTaxRow {
            month,
            gross_income: income,
            expenses: expense,
            tax_owed,
            net_income: income - tax_owed,
        });
    }

    MonthlyBreakdown {
        rows,
        floored_months,
    }
}

/// Calculates the YTD result and full-year projection for a variable-income worker.
///
/// The result's annual fields hold the projection; `band_breakdown` and the
/// effective rate describe the YTD figure.
pub fn calculate_variable_income(
    inputs: &VariableIncomeInputs,
    config: &TaxConfig,
) -> TaxCalculationResult {
    let mut trace = AuditTrace::default();
    let regime = config.regime().name.as_str();
    let current_month = inputs.current_month;
    let months_elapsed = inputs.months_elapsed();

    // Conversion
    let rate = match conversion_rate(
        inputs.income_currency,
        inputs.exchange_rate,
        config.currencies(),
    ) {
        Ok(rate) => rate,
        Err(err) => {
            // Unreachable for a validated TaxConfig.
            warn!(error = %err, "No exchange rate available; converting at par");
            trace.warn(
                "MISSING_EXCHANGE_RATE",
                format!("No rate for {}; income taken at par", inputs.income_currency),
                "high",
            );
            Decimal::ONE
        }
    };
    let converted = convert_months(&inputs.monthly_incomes, current_month, rate);
    let ytd_gross = converted.sum_through(current_month);
    trace.push_step(
        "currency_conversion",
        "Currency Conversion",
        regime,
        serde_json::json!({
            "income_currency": inputs.income_currency.code(),
            "exchange_rate": amount_str(rate),
            "through": current_month,
            "income_in_currency": amount_str(inputs.monthly_incomes.sum_through(current_month))
        }),
        serde_json::json!({ "ytd_gross_income": amount_str(ytd_gross) }),
        format!(
            "{} month(s) of {} income at ₦{} per unit = ₦{}",
            months_elapsed,
            inputs.income_currency,
            amount_str(rate),
            amount_str(ytd_gross)
        ),
    );

    // YTD figure
    let reliefs = variable_income_reliefs(inputs, config.reliefs());
    record_reliefs(&mut trace, "ytd", &reliefs.ytd);
    let ytd_total_reliefs = total_reliefs(&reliefs.ytd);
    let ytd_taxable = record_taxable_income(&mut trace, "ytd", regime, ytd_gross, ytd_total_reliefs);
    let ytd_application = apply_brackets(ytd_taxable, config.brackets());
    record_brackets(&mut trace, "ytd", regime, ytd_taxable, &ytd_application);
    let ytd_tax_owed = ytd_application.tax;

    // Projection
    let average = ytd_gross / Decimal::from(months_elapsed);
    let projected_annual_income = average * MONTHS_PER_YEAR;
    trace.push_step(
        "projection",
        "Full-Year Projection",
        regime,
        serde_json::json!({
            "ytd_gross_income": amount_str(ytd_gross),
            "months_elapsed": months_elapsed
        }),
        serde_json::json!({
            "monthly_average": amount_str(average),
            "projected_annual_income": amount_str(projected_annual_income)
        }),
        format!(
            "₦{} / {} × 12 = ₦{}",
            amount_str(ytd_gross),
            months_elapsed,
            amount_str(projected_annual_income)
        ),
    );
    record_reliefs(&mut trace, "projected annual", &reliefs.annual);
    let total_annual_reliefs = total_reliefs(&reliefs.annual);
    let projected_taxable = record_taxable_income(
        &mut trace,
        "projected annual",
        regime,
        projected_annual_income,
        total_annual_reliefs,
    );
    let projected = apply_brackets(projected_taxable, config.brackets());
    record_brackets(
        &mut trace,
        "projected annual",
        regime,
        projected_taxable,
        &projected,
    );

    // Monthly breakdown
    let rent_amount = rent_relief(inputs.annual_rent, &config.reliefs().rent_relief)
        .map_or(Decimal::ZERO, |relief| relief.annual_amount);
    let breakdown = monthly_breakdown(
        &converted,
        &inputs.monthly_expenses,
        current_month,
        rent_amount,
        config.brackets(),
    );
    let attributed: Decimal = breakdown.rows.iter().map(|row| row.tax_owed).sum();
    trace.push_step(
        "monthly_breakdown",
        "Monthly Marginal Tax",
        regime,
        serde_json::json!({
            "months_elapsed": months_elapsed,
            "rent_relief": amount_str(rent_amount)
        }),
        serde_json::json!({
            "rows": breakdown.rows.len(),
            "tax_attributed": amount_str(attributed)
        }),
        format!(
            "₦{} of tax attributed across {} month(s) with activity",
            amount_str(attributed),
            breakdown.rows.len()
        ),
    );
    for month in &breakdown.floored_months {
        trace.warn(
            "NEGATIVE_MONTHLY_DELTA",
            format!(
                "Cumulative tax fell in {}; the month's tax is shown as zero",
                month.name()
            ),
            "medium",
        );
    }

    debug!(
        months_elapsed,
        ytd_gross = %ytd_gross,
        ytd_tax = %ytd_tax_owed,
        projected_tax = %projected.tax,
        "Variable income calculation complete"
    );

    TaxCalculationResult {
        annual_gross_income: projected_annual_income,
        annual_deductions: Vec::new(),
        total_annual_deductions: Decimal::ZERO,
        annual_reliefs: reliefs.annual,
        total_annual_reliefs,
        annual_taxable_income: projected_taxable,
        annual_tax: projected.tax,
        band_breakdown: ytd_application.band_breakdown,
        effective_rate: effective_rate(ytd_tax_owed, ytd_gross),
        monthly: None,
        ytd: Some(YtdFigures {
            months_elapsed,
            gross_income: ytd_gross,
            reliefs: reliefs.ytd,
            total_reliefs: ytd_total_reliefs,
            taxable_income: ytd_taxable,
            tax_owed: ytd_tax_owed,
            net_income: ytd_gross - ytd_tax_owed,
            projected_annual_income,
            projected_annual_tax: projected.tax,
            monthly_breakdown: breakdown.rows,
        }),
        audit_trace: trace,
    }
}
