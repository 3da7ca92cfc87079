//! Calendar months and month-indexed amounts.
//!
//! Income and expense logs are modelled as a fixed array of twelve amounts
//! indexed by [`Month`], so every month always has an entry.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A calendar month. January has index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    /// January.
    Jan,
    /// February.
    Feb,
    /// March.
    Mar,
    /// April.
    Apr,
    /// May.
    May,
    /// June.
    Jun,
    /// July.
    Jul,
    /// August.
    Aug,
    /// September.
    Sep,
    /// October.
    Oct,
    /// November.
    Nov,
    /// December.
    Dec,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Returns the zero-based index of the month (January = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the month for a zero-based index, or `None` past December.
    ///
    /// # Examples
    ///
    /// ```
    /// use income_tax_engine::models::Month;
    ///
    /// assert_eq!(Month::from_index(0), Some(Month::Jan));
    /// assert_eq!(Month::from_index(11), Some(Month::Dec));
    /// assert_eq!(Month::from_index(12), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Month> {
        Self::ALL.get(index).copied()
    }

    /// Returns the months from January up to and including `self`.
    pub fn elapsed(self) -> &'static [Month] {
        &Self::ALL[..=self.index()]
    }

    /// Returns the full English name of the month.
    pub fn name(self) -> &'static str {
        match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        }
    }
}

/// Twelve amounts, one per calendar month, defaulting to zero.
///
/// Serializes as a month-keyed map. Months missing from the input map
/// deserialize to zero, so a partially filled log is always accepted.
///
/// # Examples
///
/// ```
/// use income_tax_engine::models::{Month, MonthlyAmounts};
/// use rust_decimal::Decimal;
///
/// let amounts: MonthlyAmounts = serde_json::from_str(r#"{"feb": "500000"}"#).unwrap();
/// assert_eq!(amounts[Month::Jan], Decimal::ZERO);
/// assert_eq!(amounts[Month::Feb], Decimal::new(500_000, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Month, Decimal>", into = "BTreeMap<Month, Decimal>")]
pub struct MonthlyAmounts([Decimal; 12]);

impl MonthlyAmounts {
    /// Creates a set of amounts with every month at zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Creates amounts from a full year of values in calendar order.
    pub fn from_array(values: [Decimal; 12]) -> Self {
        Self(values)
    }

    /// Returns a copy with `month` set to `amount`.
    pub fn with(mut self, month: Month, amount: Decimal) -> Self {
        self[month] = amount;
        self
    }

    /// Sums the amounts from January up to and including `through`.
    pub fn sum_through(&self, through: Month) -> Decimal {
        through.elapsed().iter().map(|m| self[*m]).sum()
    }

    /// Iterates over `(month, amount)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Month, Decimal)> + '_ {
        Month::ALL.iter().map(|m| (*m, self[*m]))
    }
}

impl Index<Month> for MonthlyAmounts {
    type Output = Decimal;

    fn index(&self, month: Month) -> &Decimal {
        &self.0[month.index()]
    }
}

impl IndexMut<Month> for MonthlyAmounts {
    fn index_mut(&mut self, month: Month) -> &mut Decimal {
        &mut self.0[month.index()]
    }
}

impl From<BTreeMap<Month, Decimal>> for MonthlyAmounts {
    fn from(map: BTreeMap<Month, Decimal>) -> Self {
        let mut amounts = Self::zero();
        for (month, amount) in map {
            amounts[month] = amount;
        }
        amounts
    }
}

impl From<MonthlyAmounts> for BTreeMap<Month, Decimal> {
    fn from(amounts: MonthlyAmounts) -> Self {
        amounts.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_month_index_round_trips_through_from_index() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(Month::from_index(i), Some(*month));
        }
    }

    #[test]
    fn test_elapsed_includes_current_month() {
        assert_eq!(Month::Jan.elapsed(), &[Month::Jan]);
        assert_eq!(Month::Mar.elapsed(), &[Month::Jan, Month::Feb, Month::Mar]);
        assert_eq!(Month::Dec.elapsed().len(), 12);
    }

    #[test]
    fn test_month_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Month::Sep).unwrap(), "\"sep\"");
        let month: Month = serde_json::from_str("\"dec\"").unwrap();
        assert_eq!(month, Month::Dec);
    }

    #[test]
    fn test_missing_months_deserialize_to_zero() {
        let amounts: MonthlyAmounts =
            serde_json::from_str(r#"{"jan": "100", "mar": "300"}"#).unwrap();

        assert_eq!(amounts[Month::Jan], dec("100"));
        assert_eq!(amounts[Month::Feb], Decimal::ZERO);
        assert_eq!(amounts[Month::Mar], dec("300"));
        assert_eq!(amounts[Month::Dec], Decimal::ZERO);
    }

    #[test]
    fn test_empty_map_is_all_zero() {
        let amounts: MonthlyAmounts = serde_json::from_str("{}").unwrap();
        assert_eq!(amounts, MonthlyAmounts::zero());
    }

    #[test]
    fn test_serializes_every_month() {
        let amounts = MonthlyAmounts::zero().with(Month::Feb, dec("42"));
        let json = serde_json::to_value(amounts).unwrap();

        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 12);
        assert_eq!(map["feb"].as_str().unwrap(), "42");
        assert_eq!(map["jan"].as_str().unwrap(), "0");
    }

    #[test]
    fn test_sum_through_ignores_later_months() {
        let amounts = MonthlyAmounts::zero()
            .with(Month::Jan, dec("100"))
            .with(Month::Feb, dec("200"))
            .with(Month::Jun, dec("9999"));

        assert_eq!(amounts.sum_through(Month::Jan), dec("100"));
        assert_eq!(amounts.sum_through(Month::Feb), dec("300"));
        assert_eq!(amounts.sum_through(Month::Dec), dec("10299"));
    }
}
