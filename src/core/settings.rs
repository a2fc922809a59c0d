//! Resolved engine settings
//!
//! The subset of [`DebtwatchConfig`] the history engine and the snapshot
//! resolver read on every request, validated once at startup.

use crate::config::{DebtwatchConfig, IndicatorConfig, ReconciliationConfig};
use crate::domain::{DebtwatchError, ExchangeRates, FallbackConstant, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub country_code: String,
    pub indicators: IndicatorConfig,
    pub history_start_year: i32,
    pub snapshot_start_year: i32,
    pub lookahead_years: i32,
    pub fallback: FallbackConstant,
    pub rates: ExchangeRates,
    pub policy: ReconciliationConfig,
    /// Overall budget for one history build or snapshot resolution
    pub request_budget: Duration,
}

impl EngineSettings {
    /// Build settings from a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the fallback period is invalid.
    pub fn from_config(config: &DebtwatchConfig) -> Result<Self> {
        let fallback = config
            .fallback
            .to_constant()
            .map_err(DebtwatchError::Configuration)?;

        Ok(Self {
            country_code: config.worldbank.country_code.trim().to_uppercase(),
            indicators: config.worldbank.indicators.clone(),
            history_start_year: config.worldbank.history_start_year,
            snapshot_start_year: config.worldbank.snapshot_start_year,
            lookahead_years: config.worldbank.lookahead_years,
            fallback,
            rates: config.currency.clone(),
            policy: config.reconciliation.clone(),
            request_budget: Duration::from_secs(config.server.request_timeout_seconds),
        })
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = DebtwatchConfig::default();
        Self {
            country_code: config.worldbank.country_code,
            indicators: config.worldbank.indicators,
            history_start_year: config.worldbank.history_start_year,
            snapshot_start_year: config.worldbank.snapshot_start_year,
            lookahead_years: config.worldbank.lookahead_years,
            fallback: FallbackConstant::default(),
            rates: config.currency,
            policy: config.reconciliation,
            request_budget: Duration::from_secs(config.server.request_timeout_seconds),
        }
    }
}
