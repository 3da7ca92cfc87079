//! Configuration types for the tax regime.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, along with the validation
//! that makes a loaded [`TaxConfig`] safe to share for the life of the process.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, MAX_EXCHANGE_RATE};

/// Metadata about the tax regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeMetadata {
    /// Short code for the regime (e.g., "NTA2025").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The tax year or version the figures apply to.
    pub version: String,
    /// URL to the official legislation.
    pub source_url: String,
}

/// One progressive band of annual taxable income.
///
/// `to` is exclusive; `None` marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Display label for the band.
    pub label: String,
    /// Inclusive lower bound.
    pub from: Decimal,
    /// Exclusive upper bound, or `None` for the top band.
    #[serde(default)]
    pub to: Option<Decimal>,
    /// The rate applied to income in this band, between 0 and 1.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns the width of the band, or `None` when it is unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.to.map(|to| to - self.from)
    }
}

/// Brackets file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsConfig {
    /// The ordered bands.
    pub brackets: Vec<TaxBracket>,
}

/// An ordered, contiguous set of tax brackets.
///
/// Construction checks that the first band starts at zero, that each band
/// starts where the previous one ends, that only the last band is unbounded,
/// and that rates lie in `[0, 1]` and never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and wraps an ordered list of brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use income_tax_engine::config::{BracketTable, TaxBracket};
    /// use rust_decimal::Decimal;
    ///
    /// let table = BracketTable::new(vec![
    ///     TaxBracket {
    ///         label: "Tax free".to_string(),
    ///         from: Decimal::ZERO,
    ///         to: Some(Decimal::new(1000, 0)),
    ///         rate: Decimal::ZERO,
    ///     },
    ///     TaxBracket {
    ///         label: "Everything else".to_string(),
    ///         from: Decimal::new(1000, 0),
    ///         to: None,
    ///         rate: Decimal::new(10, 2),
    ///     },
    /// ]);
    /// assert!(table.is_ok());
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let Some(first) = brackets.first() else {
            return Err(invalid_table("at least one bracket is required"));
        };
        if !first.from.is_zero() {
            return Err(invalid_table(format!(
                "first bracket '{}' must start at 0, starts at {}",
                first.label, first.from
            )));
        }

        let last_index = brackets.len() - 1;
        let mut previous: Option<&TaxBracket> = None;

        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid_table(format!(
                    "bracket '{}' has rate {} outside [0, 1]",
                    bracket.label, bracket.rate
                )));
            }

            match bracket.to {
                Some(to) if to <= bracket.from => {
                    return Err(invalid_table(format!(
                        "bracket '{}' ends at {} which is not above its start {}",
                        bracket.label, to, bracket.from
                    )));
                }
                None if i != last_index => {
                    return Err(invalid_table(format!(
                        "only the last bracket may be unbounded, '{}' is not last",
                        bracket.label
                    )));
                }
                Some(_) if i == last_index => {
                    return Err(invalid_table(format!(
                        "last bracket '{}' must be unbounded",
                        bracket.label
                    )));
                }
                _ => {}
            }

            if let Some(prev) = previous {
                if prev.to != Some(bracket.from) {
                    return Err(invalid_table(format!(
                        "bracket '{}' starts at {} but '{}' ends at {}",
                        bracket.label,
                        bracket.from,
                        prev.label,
                        prev.to.map_or_else(|| "infinity".to_string(), |t| t.to_string())
                    )));
                }
                if bracket.rate < prev.rate {
                    return Err(invalid_table(format!(
                        "bracket '{}' rate {} is below the previous rate {}",
                        bracket.label, bracket.rate, prev.rate
                    )));
                }
            }

            previous = Some(bracket);
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the number of brackets.
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a validated table; provided alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

fn invalid_table(message: impl Into<String>) -> EngineError {
    EngineError::InvalidBracketTable {
        message: message.into(),
    }
}

/// Rent relief policy: a share of annual rent, capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentReliefPolicy {
    /// Display label.
    pub label: String,
    /// Share of annual rent granted as relief.
    pub rate: Decimal,
    /// Maximum relief per year.
    pub cap: Decimal,
    /// Statutory reference.
    pub clause: String,
}

/// Work-expense relief policy for variable-income taxpayers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExpensePolicy {
    /// Display label.
    pub label: String,
    /// Statutory reference.
    pub clause: String,
}

/// One percentage-of-gross deduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionPolicy {
    /// Short display label; the percentage is appended when rendered.
    pub label: String,
    /// Share of annual gross income deducted.
    pub rate: Decimal,
    /// Statutory reference.
    pub clause: String,
}

/// The three salaried deductions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionPolicies {
    /// Pension contribution.
    pub pension: DeductionPolicy,
    /// Housing-fund contribution.
    pub housing_fund: DeductionPolicy,
    /// Health-insurance contribution.
    pub health_insurance: DeductionPolicy,
}

/// Relief and deduction configuration from reliefs.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliefPolicy {
    /// Rent relief.
    pub rent_relief: RentReliefPolicy,
    /// Work-expense relief.
    pub work_expenses: WorkExpensePolicy,
    /// Salaried deductions.
    pub deductions: DeductionPolicies,
}

impl ReliefPolicy {
    /// Checks that every rate lies in `[0, 1]` and the rent cap is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("rent_relief.rate", self.rent_relief.rate),
            ("deductions.pension.rate", self.deductions.pension.rate),
            ("deductions.housing_fund.rate", self.deductions.housing_fund.rate),
            (
                "deductions.health_insurance.rate",
                self.deductions.health_insurance.rate,
            ),
        ];

        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("rate {} must be between 0 and 1", rate),
                });
            }
        }

        if self.rent_relief.cap < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "rent_relief.cap".to_string(),
                message: format!("cap {} must not be negative", self.rent_relief.cap),
            });
        }

        Ok(())
    }
}

/// Default exchange rates from currencies.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyTable {
    /// The unit tax is assessed in.
    pub local_currency: Currency,
    /// Units of local currency per unit of each foreign currency.
    pub default_rates: BTreeMap<Currency, Decimal>,
}

impl CurrencyTable {
    /// Checks that every foreign currency has a default rate in
    /// `(0, MAX_EXCHANGE_RATE]`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.local_currency != Currency::LOCAL {
            return Err(EngineError::InvalidConfig {
                field: "local_currency".to_string(),
                message: format!(
                    "tax is assessed in {}, got {}",
                    Currency::LOCAL,
                    self.local_currency
                ),
            });
        }

        for currency in Currency::ALL
            .iter()
            .filter(|c| **c != self.local_currency)
        {
            match self.default_rates.get(currency) {
                Some(rate) if *rate > Decimal::ZERO && *rate <= MAX_EXCHANGE_RATE => {}
                Some(rate) => {
                    return Err(EngineError::InvalidConfig {
                        field: format!("default_rates.{}", currency),
                        message: format!(
                            "rate {} must be greater than zero and at most {}",
                            rate, MAX_EXCHANGE_RATE
                        ),
                    });
                }
                None => {
                    return Err(EngineError::UnknownCurrency {
                        code: currency.code().to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// The complete tax configuration loaded from YAML files.
///
/// Constructed once at process start and shared read-only by every
/// calculation.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    metadata: RegimeMetadata,
    brackets: BracketTable,
    reliefs: ReliefPolicy,
    currencies: CurrencyTable,
}

impl TaxConfig {
    /// Creates a new TaxConfig from its component parts, validating each.
    pub fn new(
        metadata: RegimeMetadata,
        brackets: BracketTable,
        reliefs: ReliefPolicy,
        currencies: CurrencyTable,
    ) -> EngineResult<Self> {
        reliefs.validate()?;
        currencies.validate()?;
        Ok(Self {
            metadata,
            brackets,
            reliefs,
            currencies,
        })
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the bracket table.
    pub fn brackets(&self) -> &BracketTable {
        &self.brackets
    }

    /// Returns the relief and deduction policy.
    pub fn reliefs(&self) -> &ReliefPolicy {
        &self.reliefs
    }

    /// Returns the default exchange-rate table.
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }
}
