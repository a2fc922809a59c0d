//! Snapshot command implementation
//!
//! Resolves the current figure exactly as `GET /debt` would and prints the
//! response body.

use super::load_for_command;
use crate::core::DebtService;
use crate::server::responses::DebtResponse;
use clap::Args;

/// Arguments for the snapshot command
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Currency code (USD, EUR or the configured local code)
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

impl SnapshotArgs {
    /// Execute the snapshot command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_for_command(config_path) else {
            return Ok(2);
        };

        let Some(currency) = config.currency.parse_currency(&self.currency) else {
            eprintln!(
                "❌ Unknown currency '{}'. Use USD, EUR or {}",
                self.currency, config.currency.local_code
            );
            return Ok(2);
        };

        let service = DebtService::from_config(&config)?;
        let response = DebtResponse::from(service.snapshot(currency).await);
        println!("{}", serde_json::to_string_pretty(&response)?);
        Ok(0)
    }
}
