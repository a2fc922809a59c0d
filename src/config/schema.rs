//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working configuration pointed at the public World Bank API.

use crate::domain::{ExchangeRates, FallbackConstant, PeriodKey};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main debtwatch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtwatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// World Bank indicators API
    #[serde(default)]
    pub worldbank: WorldBankConfig,

    /// Curated monthly dataset
    #[serde(default)]
    pub curated: CuratedConfig,

    /// Last known-good figures
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Fixed conversion multipliers
    #[serde(default)]
    pub currency: ExchangeRates,

    /// Merge policy
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DebtwatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.worldbank.validate()?;
        self.curated.validate()?;
        self.fallback.validate()?;
        self.currency.validate()?;
        self.reconciliation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Overall budget for one inbound request, across all outbound calls
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Grace period for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            request_timeout_seconds: default_request_timeout_seconds(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid server.bind_address '{}': {e}", self.bind_address))?;
        if self.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// World Bank indicator identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Total external debt stocks (current USD)
    #[serde(default = "default_external_debt_indicator")]
    pub external_debt: String,

    /// Central government debt, % of GDP
    #[serde(default = "default_debt_pct_gdp_indicator")]
    pub debt_pct_gdp: String,

    /// GDP (current USD)
    #[serde(default = "default_gdp_indicator")]
    pub gdp: String,

    /// Total population
    #[serde(default = "default_population_indicator")]
    pub population: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            external_debt: default_external_debt_indicator(),
            debt_pct_gdp: default_debt_pct_gdp_indicator(),
            gdp: default_gdp_indicator(),
            population: default_population_indicator(),
        }
    }
}

/// World Bank API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldBankConfig {
    /// Base URL of the API (no trailing slash)
    #[serde(default = "default_worldbank_base_url")]
    pub base_url: String,

    /// ISO 3166-1 alpha-3 country code
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Per-request timeout
    #[serde(default = "default_source_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Observations per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Upper bound on pages followed for one indicator
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// First year requested for the history series
    #[serde(default = "default_history_start_year")]
    pub history_start_year: i32,

    /// First year requested for snapshot lookups
    #[serde(default = "default_snapshot_start_year")]
    pub snapshot_start_year: i32,

    /// Years past the current one to request, to catch early releases
    #[serde(default = "default_lookahead_years")]
    pub lookahead_years: i32,

    /// Indicator identifiers
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

impl Default for WorldBankConfig {
    fn default() -> Self {
        Self {
            base_url: default_worldbank_base_url(),
            country_code: default_country_code(),
            timeout_seconds: default_source_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            history_start_year: default_history_start_year(),
            snapshot_start_year: default_snapshot_start_year(),
            lookahead_years: default_lookahead_years(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl WorldBankConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid worldbank.base_url '{}': {e}", self.base_url))?;

        let code = self.country_code.trim();
        if code.is_empty() || code.len() > 3 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!(
                "worldbank.country_code must be an ISO country code, got '{}'",
                self.country_code
            ));
        }
        if self.timeout_seconds == 0 {
            return Err("worldbank.timeout_seconds must be greater than 0".to_string());
        }
        if self.per_page == 0 {
            return Err("worldbank.per_page must be greater than 0".to_string());
        }
        if self.max_pages == 0 {
            return Err("worldbank.max_pages must be greater than 0".to_string());
        }
        if self.lookahead_years < 1 {
            return Err("worldbank.lookahead_years must be at least 1".to_string());
        }
        for (name, start) in [
            ("history_start_year", self.history_start_year),
            ("snapshot_start_year", self.snapshot_start_year),
        ] {
            if !(1960..=9999).contains(&start) {
                return Err(format!("worldbank.{name} must be 1960 or later, got {start}"));
            }
        }
        let indicators = [
            &self.indicators.external_debt,
            &self.indicators.debt_pct_gdp,
            &self.indicators.gdp,
            &self.indicators.population,
        ];
        if indicators.iter().any(|i| i.trim().is_empty()) {
            return Err("worldbank.indicators entries cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Curated monthly dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedConfig {
    /// Path to the `{ "data": [...] }` JSON file
    #[serde(default = "default_curated_path")]
    pub path: String,
}

impl Default for CuratedConfig {
    fn default() -> Self {
        Self {
            path: default_curated_path(),
        }
    }
}

impl CuratedConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("curated.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Fallback constant as written in the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Debt in USD
    #[serde(default = "default_fallback_debt_usd")]
    pub debt_usd: f64,

    /// Debt in EUR as published
    #[serde(default = "default_fallback_debt_eur")]
    pub debt_eur: f64,

    /// Population estimate, also the default for unmatched years
    #[serde(default = "default_fallback_population")]
    pub population: u64,

    #[serde(default = "default_fallback_year")]
    pub year: i32,

    #[serde(default = "default_fallback_month")]
    pub month: Option<u8>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            debt_usd: default_fallback_debt_usd(),
            debt_eur: default_fallback_debt_eur(),
            population: default_fallback_population(),
            year: default_fallback_year(),
            month: default_fallback_month(),
        }
    }
}

impl FallbackConfig {
    fn validate(&self) -> Result<(), String> {
        if !(self.debt_usd.is_finite() && self.debt_usd > 0.0) {
            return Err("fallback.debt_usd must be a positive number".to_string());
        }
        if !(self.debt_eur.is_finite() && self.debt_eur > 0.0) {
            return Err("fallback.debt_eur must be a positive number".to_string());
        }
        if self.population == 0 {
            return Err("fallback.population must be greater than 0".to_string());
        }
        self.period().map(|_| ())
    }

    /// Period of the fallback figures
    pub fn period(&self) -> Result<PeriodKey, String> {
        match self.month {
            Some(month) => PeriodKey::year_month(self.year, month),
            None => Ok(PeriodKey::year(self.year)),
        }
        .map_err(|e| format!("Invalid fallback period: {e}"))
    }

    /// Build the immutable constant injected into the resolvers
    pub fn to_constant(&self) -> Result<FallbackConstant, String> {
        Ok(FallbackConstant {
            debt_value: self.debt_usd,
            debt_value_eur: self.debt_eur,
            population: self.population,
            period: self.period()?,
        })
    }
}

/// Merge and backfill policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Month from which a curated point supersedes the annual figure of its year
    #[serde(default = "default_annual_supersede_month")]
    pub annual_supersede_month: u8,

    /// Below this many merged points the series is replaced by a synthetic one
    #[serde(default = "default_min_history_points")]
    pub min_history_points: usize,

    /// Number of synthetic years generated
    #[serde(default = "default_backfill_points")]
    pub backfill_points: usize,

    /// Half-width of the yearly debt change band (0.05 = +/-5%)
    #[serde(default = "default_backfill_band")]
    pub backfill_band: f64,

    /// Yearly population multiplier of the synthetic series
    #[serde(default = "default_population_decline")]
    pub population_decline: f64,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            annual_supersede_month: default_annual_supersede_month(),
            min_history_points: default_min_history_points(),
            backfill_points: default_backfill_points(),
            backfill_band: default_backfill_band(),
            population_decline: default_population_decline(),
        }
    }
}

impl ReconciliationConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.annual_supersede_month) {
            return Err(format!(
                "reconciliation.annual_supersede_month must be between 1 and 12, got {}",
                self.annual_supersede_month
            ));
        }
        if self.backfill_points == 0 {
            return Err("reconciliation.backfill_points must be greater than 0".to_string());
        }
        if !(self.backfill_band.is_finite() && (0.0..1.0).contains(&self.backfill_band)) {
            return Err("reconciliation.backfill_band must be in [0, 1)".to_string());
        }
        if !(self.population_decline.is_finite() && self.population_decline > 0.0) {
            return Err("reconciliation.population_decline must be positive".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    20
}

fn default_shutdown_timeout_secs() -> u64 {
    10
}

fn default_external_debt_indicator() -> String {
    "DT.DOD.DECT.CD".to_string()
}

fn default_debt_pct_gdp_indicator() -> String {
    "GC.DOD.TOTL.GD.ZS".to_string()
}

fn default_gdp_indicator() -> String {
    "NY.GDP.MKTP.CD".to_string()
}

fn default_population_indicator() -> String {
    "SP.POP.TOTL".to_string()
}

fn default_worldbank_base_url() -> String {
    "https://api.worldbank.org/v2".to_string()
}

fn default_country_code() -> String {
    "BGR".to_string()
}

fn default_source_timeout_seconds() -> u64 {
    8
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    5
}

fn default_history_start_year() -> i32 {
    1990
}

fn default_snapshot_start_year() -> i32 {
    2010
}

fn default_lookahead_years() -> i32 {
    1
}

fn default_curated_path() -> String {
    "data/monthly-debt-data.json".to_string()
}

fn default_fallback_debt_usd() -> f64 {
    57_894_000_000.0
}

fn default_fallback_debt_eur() -> f64 {
    53_605_900_000.0
}

fn default_fallback_population() -> u64 {
    6_800_000
}

fn default_fallback_year() -> i32 {
    2025
}

fn default_fallback_month() -> Option<u8> {
    Some(8)
}

fn default_annual_supersede_month() -> u8 {
    8
}

fn default_min_history_points() -> usize {
    5
}

fn default_backfill_points() -> usize {
    15
}

fn default_backfill_band() -> f64 {
    0.05
}

fn default_population_decline() -> f64 {
    0.995
}

fn default_local_path() -> String {
    "/var/log/debtwatch".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DebtwatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.worldbank.country_code, "BGR");
        assert_eq!(config.reconciliation.annual_supersede_month, 8);
        assert_eq!(config.reconciliation.min_history_points, 5);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: DebtwatchConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.worldbank.indicators.external_debt, "DT.DOD.DECT.CD");
        assert_eq!(config.fallback.population, 6_800_000);
    }

    #[test]
    fn test_fallback_to_constant() {
        let constant = FallbackConfig::default().to_constant().unwrap();
        assert_eq!(constant.period.to_string(), "2025-08");
        assert_eq!(constant.debt_value, 57_894_000_000.0);
    }

    #[test]
    fn test_fallback_without_month() {
        let config = FallbackConfig {
            month: None,
            ..Default::default()
        };
        assert_eq!(config.to_constant().unwrap().period.to_string(), "2025");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = DebtwatchConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = DebtwatchConfig::default();
        config.server.bind_address = "not-an-address".to_string();
        assert!(config.validate().unwrap_err().contains("bind_address"));
    }

    #[test]
    fn test_invalid_supersede_month() {
        let mut config = DebtwatchConfig::default();
        config.reconciliation.annual_supersede_month = 13;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_fallback_month() {
        let mut config = DebtwatchConfig::default();
        config.fallback.month = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_worldbank_base_url() {
        let mut config = DebtwatchConfig::default();
        config.worldbank.base_url = "::nope".to_string();
        assert!(config.validate().is_err());
    }
}
