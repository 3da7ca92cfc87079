//! Income currencies accepted for variable-income taxpayers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A currency in which monthly income may be logged.
///
/// Tax is always computed in the local unit ([`Currency::LOCAL`]); other
/// currencies are converted with a single rate, either supplied by the
/// caller or taken from the configured defaults.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Nigerian naira, the local unit.
    #[default]
    Ngn,
    /// United States dollar.
    Usd,
    /// Pound sterling.
    Gbp,
    /// Euro.
    Eur,
}

impl Currency {
    /// The currency tax is assessed in.
    pub const LOCAL: Currency = Currency::Ngn;

    /// All supported currencies, local first.
    pub const ALL: [Currency; 4] = [Currency::Ngn, Currency::Usd, Currency::Gbp, Currency::Eur];

    /// Returns the ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Ngn => "NGN",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
        }
    }

    /// Returns the display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Ngn => "₦",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownCurrency {
                code: s.to_string(),
            })
    }
}
