//! Current-value snapshot and the fallback constant it bottoms out at

use super::currency::{Currency, ExchangeRates};
use super::observation::per_capita;
use super::period::PeriodKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which source produced a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Locally curated monthly release
    Curated,
    /// Primary World Bank debt indicator
    #[serde(rename = "worldbank")]
    WorldBank,
    /// Percent-of-GDP indicator combined with GDP
    #[serde(rename = "worldbank_derived")]
    WorldBankDerived,
    /// Hand-maintained fallback constant
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Curated => "curated",
            DataSource::WorldBank => "worldbank",
            DataSource::WorldBankDerived => "worldbank_derived",
            DataSource::Fallback => "fallback",
        }
    }

    /// Curated and fallback figures are monthly releases and count as real time
    pub fn is_real_time(&self) -> bool {
        matches!(self, DataSource::Curated | DataSource::Fallback)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known-good debt and population figures
///
/// Loaded once from configuration and shared read-only; it only changes when
/// the service is redeployed with new values.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackConstant {
    /// Debt in USD
    pub debt_value: f64,
    /// Debt in EUR as published
    pub debt_value_eur: f64,
    pub population: u64,
    pub period: PeriodKey,
}

impl FallbackConstant {
    pub fn source_tag(&self) -> DataSource {
        DataSource::Fallback
    }

    pub fn per_person(&self) -> f64 {
        per_capita(self.debt_value, self.population)
    }
}

impl Default for FallbackConstant {
    fn default() -> Self {
        Self {
            debt_value: 57_894_000_000.0,
            debt_value_eur: 53_605_900_000.0,
            population: 6_800_000,
            period: PeriodKey::year_month(2025, 8).unwrap_or(PeriodKey::year(2025)),
        }
    }
}

/// The single "now" record served by `GET /debt`
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSnapshot {
    pub debt_value: f64,
    pub population: u64,
    pub per_person: f64,
    pub period: PeriodKey,
    /// ISO code of the currency `debt_value` and `per_person` are in
    pub currency: String,
    pub data_source: DataSource,
    pub is_real_time: bool,
    pub is_newer_than_fallback: bool,
    pub warning: Option<String>,
}

impl CurrentSnapshot {
    /// Snapshot made entirely of fallback figures, in USD
    pub fn from_fallback(
        fallback: &FallbackConstant,
        data_source: DataSource,
        warning: Option<String>,
    ) -> Self {
        Self {
            debt_value: fallback.debt_value,
            population: fallback.population,
            per_person: fallback.per_person(),
            period: fallback.period,
            currency: "USD".to_string(),
            data_source,
            is_real_time: data_source.is_real_time(),
            is_newer_than_fallback: false,
            warning,
        }
    }

    /// Whether the debt and period are exactly the fallback figures
    pub fn carries_fallback_figures(&self, fallback: &FallbackConstant) -> bool {
        self.period == fallback.period && self.debt_value == fallback.debt_value
    }

    /// Re-express a USD snapshot in another currency
    ///
    /// Fallback figures are converted from their published EUR value, which
    /// keeps EUR requests exact; everything else goes through the USD rates.
    pub fn in_currency(
        mut self,
        rates: &ExchangeRates,
        target: Currency,
        fallback: &FallbackConstant,
    ) -> Self {
        if target == Currency::Usd {
            return self;
        }
        self.debt_value = if self.carries_fallback_figures(fallback) {
            rates.from_eur(fallback.debt_value_eur, target)
        } else {
            rates.from_usd(self.debt_value, target)
        };
        self.per_person = per_capita(self.debt_value, self.population);
        self.currency = rates.code(target);
        self
    }
}
