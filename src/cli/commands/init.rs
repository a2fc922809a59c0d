//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "debtwatch.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing debtwatch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set worldbank.country_code and the [fallback] figures");
                println!("  2. Point curated.path at your monthly dataset");
                println!("  3. Validate configuration: debtwatch validate-config");
                println!("  4. Run the service: debtwatch serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

/// Sample configuration with every setting at its default
pub const SAMPLE_CONFIG: &str = r#"# debtwatch configuration
#
# Every value below is the built-in default. Any key can also be set with a
# DEBTWATCH_<SECTION>_<KEY> environment variable, e.g. DEBTWATCH_SERVER_BIND_ADDRESS.

[application]
# trace, debug, info, warn, error
log_level = "info"

[server]
bind_address = "0.0.0.0:8080"
# Budget for one request across all outbound calls
request_timeout_seconds = 20
shutdown_timeout_secs = 10

[worldbank]
base_url = "https://api.worldbank.org/v2"
country_code = "BGR"
timeout_seconds = 8
connect_timeout_seconds = 5
per_page = 100
max_pages = 5
history_start_year = 1990
snapshot_start_year = 2010
lookahead_years = 1

[worldbank.indicators]
external_debt = "DT.DOD.DECT.CD"
debt_pct_gdp = "GC.DOD.TOTL.GD.ZS"
gdp = "NY.GDP.MKTP.CD"
population = "SP.POP.TOTL"

[curated]
# { "data": [ { "year": "2025", "month": "08", "debt": 53605900000, "debtUSD": 57894000000 } ] }
path = "data/monthly-debt-data.json"

[fallback]
# Last known-good figures; update on each official release
debt_usd = 57894000000
debt_eur = 53605900000
population = 6800000
year = 2025
month = 8

[currency]
# Fixed, approximate multipliers
eur_to_usd = 1.08
usd_to_eur = 0.92
usd_to_local = 1.80
eur_to_local = 1.95583
local_code = "BGN"

[reconciliation]
# Curated months from this one onwards replace the annual figure of their year
annual_supersede_month = 8
min_history_points = 5
backfill_points = 15
backfill_band = 0.05
population_decline = 0.995

[logging]
local_enabled = false
local_path = "/var/log/debtwatch"
# daily, hourly, never
local_rotation = "daily"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DebtwatchConfig, ReconciliationConfig};

    #[test]
    fn test_sample_config_matches_defaults() {
        let parsed: DebtwatchConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert!(parsed.validate().is_ok());

        let defaults = DebtwatchConfig::default();
        assert_eq!(parsed.server.bind_address, defaults.server.bind_address);
        assert_eq!(parsed.worldbank.indicators.gdp, defaults.worldbank.indicators.gdp);
        assert_eq!(parsed.fallback.debt_usd, defaults.fallback.debt_usd);
        assert_eq!(parsed.currency, defaults.currency);
        assert_eq!(
            parsed.reconciliation.backfill_points,
            ReconciliationConfig::default().backfill_points
        );
    }

    #[tokio::test]
    async fn test_init_writes_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("debtwatch.toml");
        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(output.exists());
        assert_eq!(args.execute().await.unwrap(), 2);

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
    }
}
