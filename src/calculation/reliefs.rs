//! Reliefs and deductions.
//!
//! Salaried workers may deduct pension, housing-fund and health-insurance
//! contributions and claim rent relief. Variable-income workers claim rent
//! relief and relief for logged work expenses, computed separately for the
//! year-to-date figure and the full-year projection.

use rust_decimal::Decimal;

use crate::config::{DeductionPolicy, ReliefPolicy, RentReliefPolicy};
use crate::models::{DeductionItem, ReliefItem, SalariedInputs, VariableIncomeInputs};

use super::common::{MONTHS_PER_YEAR, percent_str};

/// Computes rent relief on the full annual rent.
///
/// Returns `None` when no rent is paid. The relief is `rate × annual_rent`
/// capped at the policy maximum and is never prorated by months elapsed.
///
/// # Examples
///
/// ```
/// use income_tax_engine::calculation::rent_relief;
/// use income_tax_engine::config::RentReliefPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = RentReliefPolicy {
///     label: "Rent Relief".to_string(),
///     rate: Decimal::new(20, 2),
///     cap: Decimal::new(500_000, 0),
///     clause: "NTA 2025 §30(vi)".to_string(),
/// };
///
/// let relief = rent_relief(Decimal::new(1_200_000, 0), &policy).unwrap();
/// assert_eq!(relief.annual_amount, Decimal::new(240_000, 0));
/// assert!(rent_relief(Decimal::ZERO, &policy).is_none());
/// ```
pub fn rent_relief(annual_rent: Decimal, policy: &RentReliefPolicy) -> Option<ReliefItem> {
    if annual_rent <= Decimal::ZERO {
        return None;
    }

    let annual_amount = (annual_rent * policy.rate).min(policy.cap);

    Some(ReliefItem {
        label: policy.label.clone(),
        annual_amount,
        monthly_amount: annual_amount / MONTHS_PER_YEAR,
        source: Some(policy.clause.clone()),
    })
}

/// Computes the salaried deductions that are toggled on.
///
/// Each is a fixed share of annualized gross income, listed in the order
/// pension, housing fund, health insurance.
pub fn salaried_deductions(inputs: &SalariedInputs, policy: &ReliefPolicy) -> Vec<DeductionItem> {
    let annual_gross = inputs.monthly_gross_income * MONTHS_PER_YEAR;
    let deductions = &policy.deductions;

    [
        (inputs.include_pension, &deductions.pension),
        (inputs.include_housing_fund, &deductions.housing_fund),
        (inputs.include_health_insurance, &deductions.health_insurance),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, deduction)| deduction_item(annual_gross, deduction))
    .collect()
}

fn deduction_item(annual_gross: Decimal, policy: &DeductionPolicy) -> DeductionItem {
    let annual_amount = annual_gross * policy.rate;

    DeductionItem {
        label: format!("{} ({})", policy.label, percent_str(policy.rate)),
        annual_amount,
        monthly_amount: annual_amount / MONTHS_PER_YEAR,
        rate: Some(policy.rate),
    }
}

/// Computes the reliefs for a salaried worker (rent relief only).
pub fn salaried_reliefs(inputs: &SalariedInputs, policy: &ReliefPolicy) -> Vec<ReliefItem> {
    rent_relief(inputs.annual_rent, &policy.rent_relief)
        .into_iter()
        .collect()
}

/// The two relief sets for a variable-income worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableIncomeReliefs {
    /// Reliefs applied to the year-to-date figure.
    pub ytd: Vec<ReliefItem>,
    /// Reliefs applied to the full-year projection.
    pub annual: Vec<ReliefItem>,
    /// Work expenses logged over the elapsed months.
    pub ytd_expenses: Decimal,
}

/// Computes the YTD and annual relief sets for a variable-income worker.
///
/// Rent relief appears in both sets at the same amount. Work-expense relief
/// uses the summed expenses in the YTD set and the monthly average scaled to
/// twelve months in the annual set; it is omitted when no expenses are logged.
pub fn variable_income_reliefs(
    inputs: &VariableIncomeInputs,
    policy: &ReliefPolicy,
) -> VariableIncomeReliefs {
    let mut ytd = Vec::new();
    let mut annual = Vec::new();

    if let Some(rent) = rent_relief(inputs.annual_rent, &policy.rent_relief) {
        ytd.push(rent.clone());
        annual.push(rent);
    }

    let ytd_expenses = inputs.monthly_expenses.sum_through(inputs.current_month);
    let months_elapsed = Decimal::from(inputs.months_elapsed());

    if ytd_expenses > Decimal::ZERO {
        let average = ytd_expenses / months_elapsed;
        let work = &policy.work_expenses;

        ytd.push(ReliefItem {
            label: format!("{} (YTD)", work.label),
            annual_amount: ytd_expenses,
            monthly_amount: average,
            source: Some(work.clause.clone()),
        });
        annual.push(ReliefItem {
            label: work.label.clone(),
            annual_amount: average * MONTHS_PER_YEAR,
            monthly_amount: average,
            source: Some(work.clause.clone()),
        });
    }

    VariableIncomeReliefs {
        ytd,
        annual,
        ytd_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::models::{Currency, Month, MonthlyAmounts, total_reliefs};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn salaried(monthly: &str) -> SalariedInputs {
        SalariedInputs {
            monthly_gross_income: dec(monthly),
            annual_rent: Decimal::ZERO,
            include_pension: false,
            include_housing_fund: false,
            include_health_insurance: false,
        }
    }

    fn variable(current_month: Month) -> VariableIncomeInputs {
        VariableIncomeInputs {
            monthly_incomes: MonthlyAmounts::zero(),
            monthly_expenses: MonthlyAmounts::zero(),
            current_month,
            income_currency: Currency::Ngn,
            exchange_rate: None,
            annual_rent: Decimal::ZERO,
        }
    }

    #[test]
    fn test_rent_relief_is_twenty_percent_of_rent() {
        let config = test_config();
        let relief = rent_relief(dec("1200000"), &config.reliefs().rent_relief).unwrap();

        assert_eq!(relief.label, "Rent Relief");
        assert_eq!(relief.annual_amount, dec("240000"));
        assert_eq!(relief.monthly_amount, dec("20000"));
        assert_eq!(relief.source.as_deref(), Some("NTA 2025 §30(vi)"));
    }

    #[test]
    fn test_rent_relief_caps_at_five_hundred_thousand() {
        let config = test_config();
        let policy = &config.reliefs().rent_relief;

        assert_eq!(rent_relief(dec("2500000"), policy).unwrap().annual_amount, dec("500000"));
        assert_eq!(rent_relief(dec("9000000"), policy).unwrap().annual_amount, dec("500000"));
    }

    #[test]
    fn test_rent_relief_absent_without_rent() {
        let config = test_config();
        let policy = &config.reliefs().rent_relief;

        assert!(rent_relief(Decimal::ZERO, policy).is_none());
        assert!(rent_relief(dec("-100"), policy).is_none());
    }

    #[test]
    fn test_no_deductions_when_toggles_off() {
        let config = test_config();
        assert!(salaried_deductions(&salaried("300000"), config.reliefs()).is_empty());
    }

    #[test]
    fn test_all_deductions_in_fixed_order() {
        let config = test_config();
        let mut inputs = salaried("300000");
        inputs.include_pension = true;
        inputs.include_housing_fund = true;
        inputs.include_health_insurance = true;

        let deductions = salaried_deductions(&inputs, config.reliefs());

        assert_eq!(deductions.len(), 3);
        assert_eq!(deductions[0].label, "Pension (8%)");
        assert_eq!(deductions[0].annual_amount, dec("288000"));
        assert_eq!(deductions[0].monthly_amount, dec("24000"));
        assert_eq!(deductions[0].rate, Some(dec("0.08")));
        assert_eq!(deductions[1].label, "NHF (2.5%)");
        assert_eq!(deductions[1].annual_amount, dec("90000"));
        assert_eq!(deductions[2].label, "NHIS (1.75%)");
        assert_eq!(deductions[2].annual_amount, dec("63000"));
        assert_eq!(deductions[2].monthly_amount, dec("5250"));
    }

    #[test]
    fn test_single_deduction_toggle() {
        let config = test_config();
        let mut inputs = salaried("100000");
        inputs.include_housing_fund = true;

        let deductions = salaried_deductions(&inputs, config.reliefs());

        assert_eq!(deductions.len(), 1);
        assert_eq!(deductions[0].label, "NHF (2.5%)");
        assert_eq!(deductions[0].annual_amount, dec("30000"));
    }

    #[test]
    fn test_salaried_reliefs_only_include_rent() {
        let config = test_config();
        let mut inputs = salaried("300000");
        assert!(salaried_reliefs(&inputs, config.reliefs()).is_empty());

        inputs.annual_rent = dec("1200000");
        let reliefs = salaried_reliefs(&inputs, config.reliefs());
        assert_eq!(reliefs.len(), 1);
        assert_eq!(reliefs[0].annual_amount, dec("240000"));
    }

    #[test]
    fn test_variable_income_without_rent_or_expenses_has_no_reliefs() {
        let config = test_config();
        let reliefs = variable_income_reliefs(&variable(Month::Jun), config.reliefs());

        assert!(reliefs.ytd.is_empty());
        assert!(reliefs.annual.is_empty());
        assert_eq!(reliefs.ytd_expenses, Decimal::ZERO);
    }

    #[test]
    fn test_rent_relief_is_not_prorated_for_variable_income() {
        let config = test_config();
        let mut inputs = variable(Month::Feb);
        inputs.annual_rent = dec("1200000");

        let reliefs = variable_income_reliefs(&inputs, config.reliefs());

        assert_eq!(reliefs.ytd.len(), 1);
        assert_eq!(reliefs.ytd[0].annual_amount, dec("240000"));
        assert_eq!(reliefs.annual[0].annual_amount, dec("240000"));
    }

    #[test]
    fn test_work_expenses_split_into_ytd_and_annual() {
        let config = test_config();
        let mut inputs = variable(Month::Mar);
        inputs.monthly_expenses = MonthlyAmounts::zero()
            .with(Month::Jan, dec("10000"))
            .with(Month::Feb, dec("20000"))
            .with(Month::Mar, dec("30000"));

        let reliefs = variable_income_reliefs(&inputs, config.reliefs());

        assert_eq!(reliefs.ytd_expenses, dec("60000"));
        assert_eq!(reliefs.ytd[0].label, "Work Expenses (YTD)");
        assert_eq!(reliefs.ytd[0].annual_amount, dec("60000"));
        assert_eq!(reliefs.ytd[0].monthly_amount, dec("20000"));
        assert_eq!(reliefs.ytd[0].source.as_deref(), Some("NTA 2025 §20"));
        assert_eq!(reliefs.annual[0].label, "Work Expenses");
        assert_eq!(reliefs.annual[0].annual_amount, dec("240000"));
        assert_eq!(reliefs.annual[0].monthly_amount, dec("20000"));
    }

    #[test]
    fn test_expenses_after_current_month_are_ignored() {
        let config = test_config();
        let mut inputs = variable(Month::Jan);
        inputs.monthly_expenses = MonthlyAmounts::zero().with(Month::Feb, dec("50000"));

        let reliefs = variable_income_reliefs(&inputs, config.reliefs());

        assert_eq!(reliefs.ytd_expenses, Decimal::ZERO);
        assert!(reliefs.ytd.is_empty());
    }

    #[test]
    fn test_rent_precedes_work_expenses() {
        let config = test_config();
        let mut inputs = variable(Month::Dec);
        inputs.annual_rent = dec("600000");
        inputs.monthly_expenses = MonthlyAmounts::zero().with(Month::Apr, dec("12000"));

        let reliefs = variable_income_reliefs(&inputs, config.reliefs());

        assert_eq!(reliefs.ytd[0].label, "Rent Relief");
        assert_eq!(reliefs.ytd[1].label, "Work Expenses (YTD)");
        assert_eq!(total_reliefs(&reliefs.ytd), dec("132000"));
        assert_eq!(total_reliefs(&reliefs.annual), dec("132000"));
    }
}
