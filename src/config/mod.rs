//! Configuration loading and management for the income tax engine.
//!
//! This module loads a tax regime from YAML files: the progressive bracket
//! table, the relief and deduction policy, and the default exchange rates.
//!
//! # Example
//!
//! ```no_run
//! use income_tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/nta2025").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketTable, BracketsConfig, CurrencyTable, DeductionPolicies, DeductionPolicy,
    RegimeMetadata, ReliefPolicy, RentReliefPolicy, TaxBracket, TaxConfig, WorkExpensePolicy,
};

/// A regime matching the shipped `config/nta2025` files, built in code for unit tests.
#[cfg(test)]
pub(crate) fn test_config() -> TaxConfig {
    use crate::models::Currency;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(label: &str, from: &str, to: Option<&str>, rate: &str) -> TaxBracket {
        TaxBracket {
            label: label.to_string(),
            from: dec(from),
            to: to.map(dec),
            rate: dec(rate),
        }
    }

    let metadata = RegimeMetadata {
        code: "NTA2025".to_string(),
        name: "Nigeria Tax Act 2025".to_string(),
        version: "2026".to_string(),
        source_url: "https://example.com".to_string(),
    };

    let brackets = BracketTable::new(vec![
        bracket("First ₦800,000", "0", Some("800000"), "0"),
        bracket("₦800k – ₦3m", "800000", Some("3000000"), "0.15"),
        bracket("₦3m – ₦12m", "3000000", Some("12000000"), "0.18"),
        bracket("₦12m – ₦25m", "12000000", Some("25000000"), "0.21"),
        bracket("₦25m – ₦50m", "25000000", Some("50000000"), "0.23"),
        bracket("Above ₦50m", "50000000", None, "0.25"),
    ])
    .unwrap();

    let reliefs = ReliefPolicy {
        rent_relief: RentReliefPolicy {
            label: "Rent Relief".to_string(),
            rate: dec("0.20"),
            cap: dec("500000"),
            clause: "NTA 2025 §30(vi)".to_string(),
        },
        work_expenses: WorkExpensePolicy {
            label: "Work Expenses".to_string(),
            clause: "NTA 2025 §20".to_string(),
        },
        deductions: DeductionPolicies {
            pension: DeductionPolicy {
                label: "Pension".to_string(),
                rate: dec("0.08"),
                clause: "Pension Reform Act 2014".to_string(),
            },
            housing_fund: DeductionPolicy {
                label: "NHF".to_string(),
                rate: dec("0.025"),
                clause: "National Housing Fund Act".to_string(),
            },
            health_insurance: DeductionPolicy {
                label: "NHIS".to_string(),
                rate: dec("0.0175"),
                clause: "National Health Insurance Authority Act 2022".to_string(),
            },
        },
    };

    let mut default_rates = BTreeMap::new();
    default_rates.insert(Currency::Usd, dec("1550"));
    default_rates.insert(Currency::Gbp, dec("1950"));
    default_rates.insert(Currency::Eur, dec("1700"));

    let currencies = CurrencyTable {
        local_currency: Currency::Ngn,
        default_rates,
    };

    TaxConfig::new(metadata, brackets, reliefs, currencies).unwrap()
}
