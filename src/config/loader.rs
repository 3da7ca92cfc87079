//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a tax regime
//! from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::Currency;

use super::types::{
    BracketTable, BracketsConfig, CurrencyTable, RegimeMetadata, ReliefPolicy, TaxConfig,
};

/// Loads and provides access to a tax regime configuration.
///
/// # Directory Structure
///
/// ```text
/// config/nta2025/
/// ├── regime.yaml      # Regime metadata
/// ├── brackets.yaml    # Progressive bands
/// ├── reliefs.yaml     # Rent relief, work expenses, salaried deductions
/// └── currencies.yaml  # Default exchange rates
/// ```
///
/// # Example
///
/// ```no_run
/// use income_tax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/nta2025").unwrap();
/// println!("Loaded regime: {}", loader.regime().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The bracket table, relief policy, or currency table fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;
        let brackets = Self::load_yaml::<BracketsConfig>(&path.join("brackets.yaml"))?;
        let reliefs = Self::load_yaml::<ReliefPolicy>(&path.join("reliefs.yaml"))?;
        let currencies = Self::load_yaml::<CurrencyTable>(&path.join("currencies.yaml"))?;

        let table = BracketTable::new(brackets.brackets)?;
        let config = TaxConfig::new(metadata, table, reliefs, currencies)?;

        debug!(
            regime = %config.regime().code,
            brackets = config.brackets().len(),
            "Loaded tax configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> TaxConfig {
        self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Gets the default exchange rate for a currency.
    ///
    /// The local currency always converts at 1.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use income_tax_engine::config::ConfigLoader;
    /// use income_tax_engine::models::Currency;
    ///
    /// let loader = ConfigLoader::load("./config/nta2025")?;
    /// let rate = loader.default_rate(Currency::Usd)?;
    /// println!("USD default rate: {}", rate);
    /// # Ok::<(), income_tax_engine::error::EngineError>(())
    /// ```
    pub fn default_rate(&self, currency: Currency) -> EngineResult<Decimal> {
        crate::calculation::default_rate(currency, self.config.currencies())
    }
}
