//! CLI command implementations
//!
//! This module contains all CLI command implementations. Each returns the
//! process exit code: 0 on success, 2 for configuration errors, 5 for fatal
//! errors.

pub mod history;
pub mod init;
pub mod serve;
pub mod snapshot;
pub mod validate;

use crate::config::{load_config_or_default, DebtwatchConfig};

/// Load configuration for a command, printing the error on failure
fn load_for_command(config_path: &str) -> Option<DebtwatchConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(config_path = %config_path, error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration: {e}");
            None
        }
    }
}
