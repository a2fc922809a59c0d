//! History command implementation

use super::load_for_command;
use crate::core::DebtService;
use crate::server::responses::HistoryResponse;
use clap::Args;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {}

impl HistoryArgs {
    /// Execute the history command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_for_command(config_path) else {
            return Ok(2);
        };

        let service = DebtService::from_config(&config)?;
        let history = service.history().await;
        if history.simulated {
            eprintln!("⚠️  Not enough source data; the series below is synthetic");
        }
        println!("{}", serde_json::to_string_pretty(&HistoryResponse::from(history))?);
        Ok(0)
    }
}
