//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for debtwatch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// debtwatch - public debt figures with source precedence and fallbacks
#[derive(Parser, Debug)]
#[command(name = "debtwatch")]
#[command(version, about, long_about = None)]
#[command(author = "Debtwatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "debtwatch.toml", env = "DEBTWATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DEBTWATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(commands::serve::ServeArgs),

    /// Resolve and print the current debt snapshot
    Snapshot(commands::snapshot::SnapshotArgs),

    /// Build and print the reconciled debt history
    History(commands::history::HistoryArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
