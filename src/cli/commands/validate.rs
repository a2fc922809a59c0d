//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the debtwatch configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bind Address: {}", config.server.bind_address);
        println!("  World Bank API: {}", config.worldbank.base_url);
        println!("  Country: {}", config.worldbank.country_code);
        println!("  Curated Dataset: {}", config.curated.path);
        println!(
            "  Fallback: {} USD, population {}, period {}",
            config.fallback.debt_usd,
            config.fallback.population,
            config
                .fallback
                .period()
                .map(|p| p.to_string())
                .unwrap_or_default()
        );
        println!(
            "  Annual Supersede Month: {}",
            config.reconciliation.annual_supersede_month
        );
        println!("  Local Currency: {}", config.currency.local_code);
        println!();
        Ok(0)
    }
}
