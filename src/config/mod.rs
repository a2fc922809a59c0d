//! Configuration management for debtwatch.
//!
//! debtwatch uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DEBTWATCH_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use debtwatch::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("debtwatch.toml")?;
//! println!("Country: {}", config.worldbank.country_code);
//! println!("Curated dataset: {}", config.curated.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0:8080"
//! request_timeout_seconds = 20
//!
//! [worldbank]
//! country_code = "BGR"
//! timeout_seconds = 8
//!
//! [curated]
//! path = "data/monthly-debt-data.json"
//!
//! [fallback]
//! debt_usd = 57894000000
//! debt_eur = 53605900000
//! population = 6800000
//! year = 2025
//! month = 8
//!
//! [currency]
//! eur_to_usd = 1.08
//! usd_to_eur = 0.92
//! usd_to_local = 1.80
//! eur_to_local = 1.95583
//! local_code = "BGN"
//!
//! [reconciliation]
//! annual_supersede_month = 8
//! min_history_points = 5
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, CuratedConfig, DebtwatchConfig, FallbackConfig, IndicatorConfig,
    LoggingConfig, ReconciliationConfig, ServerConfig, WorldBankConfig,
};
