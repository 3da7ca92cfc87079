//! Progressive bracket application.
//!
//! [`apply_brackets`] is the only place tax is computed from a taxable
//! amount. Both aggregators and the monthly breakdown go through it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{BracketTable, TaxBracket};
use crate::models::BandResult;

/// The result of splitting a taxable amount across the bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketApplication {
    /// One entry per bracket, in bracket order.
    pub band_breakdown: Vec<BandResult>,
    /// Sum of `tax_in_band` across all bands.
    pub tax: Decimal,
}

impl BracketApplication {
    /// Returns the rate of the highest band that received income, or zero.
    pub fn marginal_rate(&self) -> Decimal {
        self.band_breakdown
            .iter()
            .rev()
            .find(|band| band.taxable_in_band > Decimal::ZERO)
            .map_or(Decimal::ZERO, |band| band.rate)
    }
}

/// Splits `taxable_income` across the bracket table and sums the tax.
///
/// The output always holds exactly one [`BandResult`] per bracket. Bands the
/// income never reaches are reported with zero taxable income and zero tax.
///
/// # Examples
///
/// ```
/// use income_tax_engine::calculation::apply_brackets;
/// use income_tax_engine::config::{BracketTable, TaxBracket};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     TaxBracket {
///         label: "Tax free".to_string(),
///         from: Decimal::ZERO,
///         to: Some(Decimal::new(800_000, 0)),
///         rate: Decimal::ZERO,
///     },
///     TaxBracket {
///         label: "Above".to_string(),
///         from: Decimal::new(800_000, 0),
///         to: None,
///         rate: Decimal::new(15, 2),
///     },
/// ])
/// .unwrap();
///
/// let result = apply_brackets(Decimal::new(1_000_000, 0), &table);
/// assert_eq!(result.tax, Decimal::new(30_000, 0));
/// assert_eq!(result.band_breakdown.len(), 2);
/// ```
pub fn apply_brackets(taxable_income: Decimal, table: &BracketTable) -> BracketApplication {
    if taxable_income <= Decimal::ZERO {
        return BracketApplication {
            band_breakdown: table.brackets().iter().map(empty_band).collect(),
            tax: Decimal::ZERO,
        };
    }

    let mut remaining = taxable_income;
    let mut tax = Decimal::ZERO;
    let mut band_breakdown = Vec::with_capacity(table.len());

    for bracket in table.brackets() {
        if remaining <= Decimal::ZERO {
            band_breakdown.push(empty_band(bracket));
            continue;
        }

        // The unbounded top band absorbs whatever is left.
        let width = bracket.width().unwrap_or(remaining);
        let taxable_in_band = width.min(remaining).max(Decimal::ZERO);
        let tax_in_band = taxable_in_band * bracket.rate;

        band_breakdown.push(BandResult {
            label: bracket.label.clone(),
            rate: bracket.rate,
            taxable_in_band,
            tax_in_band,
        });

        tax += tax_in_band;
        remaining -= taxable_in_band;
    }

    BracketApplication {
        band_breakdown,
        tax,
    }
}

fn empty_band(bracket: &TaxBracket) -> BandResult {
    BandResult {
        label: bracket.label.clone(),
        rate: bracket.rate,
        taxable_in_band: Decimal::ZERO,
        tax_in_band: Decimal::ZERO,
    }
}
