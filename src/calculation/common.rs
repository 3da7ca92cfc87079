//! Small numeric helpers shared by the aggregators.

use rust_decimal::Decimal;

use crate::models::{AuditTrace, ReliefItem};

use super::BracketApplication;

pub(crate) const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Clamps a value to be no lower than zero.
///
/// # Examples
///
/// ```
/// use income_tax_engine::calculation::floor_at_zero;
/// use rust_decimal::Decimal;
///
/// assert_eq!(floor_at_zero(Decimal::new(-5, 0)), Decimal::ZERO);
/// assert_eq!(floor_at_zero(Decimal::new(5, 0)), Decimal::new(5, 0));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Returns `tax / gross`, or zero when `gross` is not positive.
///
/// # Examples
///
/// ```
/// use income_tax_engine::calculation::effective_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(effective_rate(Decimal::new(30, 0), Decimal::new(300, 0)), Decimal::new(1, 1));
/// assert_eq!(effective_rate(Decimal::new(30, 0), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn effective_rate(tax: Decimal, gross: Decimal) -> Decimal {
    if gross > Decimal::ZERO {
        tax / gross
    } else {
        Decimal::ZERO
    }
}

/// Renders an amount for audit output without trailing zeros.
pub(crate) fn amount_str(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Renders a rate as a percentage (0.175 → "17.5%").
pub(crate) fn percent_str(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Records one audit step per relief in `reliefs`.
pub(crate) fn record_reliefs(trace: &mut AuditTrace, scope: &str, reliefs: &[ReliefItem]) {
    for relief in reliefs {
        trace.push_step(
            "relief",
            &relief.label,
            relief.source.as_deref().unwrap_or_default(),
            serde_json::json!({ "scope": scope }),
            serde_json::json!({
                "annual_amount": amount_str(relief.annual_amount),
                "monthly_amount": amount_str(relief.monthly_amount)
            }),
            format!(
                "{} ({}): ₦{} subtracted from gross income",
                relief.label,
                scope,
                amount_str(relief.annual_amount)
            ),
        );
    }
}

/// Records the taxable-income step, warning when the floor at zero applied.
pub(crate) fn record_taxable_income(
    trace: &mut AuditTrace,
    scope: &str,
    clause_ref: &str,
    gross: Decimal,
    subtracted: Decimal,
) -> Decimal {
    let unfloored = gross - subtracted;
    let taxable = floor_at_zero(unfloored);

    trace.push_step(
        "taxable_income",
        "Taxable Income",
        clause_ref,
        serde_json::json!({
            "scope": scope,
            "gross_income": amount_str(gross),
            "reliefs_and_deductions": amount_str(subtracted)
        }),
        serde_json::json!({ "taxable_income": amount_str(taxable) }),
        format!(
            "max(0, ₦{} - ₦{}) = ₦{}",
            amount_str(gross),
            amount_str(subtracted),
            amount_str(taxable)
        ),
    );

    if unfloored < Decimal::ZERO {
        trace.warn(
            "RELIEFS_EXCEED_INCOME",
            format!(
                "{} reliefs and deductions (₦{}) exceed gross income (₦{}); taxable income floored at zero",
                scope,
                amount_str(subtracted),
                amount_str(gross)
            ),
            "low",
        );
    }

    taxable
}

/// Records the bracket split of `taxable`.
pub(crate) fn record_brackets(
    trace: &mut AuditTrace,
    scope: &str,
    clause_ref: &str,
    taxable: Decimal,
    application: &BracketApplication,
) {
    let bands: Vec<serde_json::Value> = application
        .band_breakdown
        .iter()
        .filter(|band| band.taxable_in_band > Decimal::ZERO)
        .map(|band| {
            serde_json::json!({
                "label": band.label,
                "rate": amount_str(band.rate),
                "taxable_in_band": amount_str(band.taxable_in_band),
                "tax_in_band": amount_str(band.tax_in_band)
            })
        })
        .collect();

    trace.push_step(
        "bracket_application",
        "Progressive Bracket Application",
        clause_ref,
        serde_json::json!({ "scope": scope, "taxable_income": amount_str(taxable) }),
        serde_json::json!({ "bands": bands, "tax": amount_str(application.tax) }),
        format!(
            "₦{} across {} band(s), marginal rate {}: tax ₦{}",
            amount_str(taxable),
            bands.len(),
            percent_str(application.marginal_rate()),
            amount_str(application.tax)
        ),
    );
}
