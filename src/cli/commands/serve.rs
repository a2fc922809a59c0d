//! Serve command implementation

use super::load_for_command;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, overriding server.bind_address
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let Some(config) = load_for_command(config_path) else {
            return Ok(2);
        };

        tracing::info!(
            country = %config.worldbank.country_code,
            curated = %config.curated.path,
            "Starting debtwatch service"
        );

        server::serve(&config, self.bind.as_deref(), shutdown_signal).await?;
        Ok(0)
    }
}
