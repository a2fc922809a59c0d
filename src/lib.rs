// Debtwatch - Public Debt Aggregation Service
// Copyright (c) 2025 Debtwatch Contributors
// Licensed under the MIT License

//! # Debtwatch - Public Debt Aggregation Service
//!
//! Debtwatch serves a country's public debt figures for charting: one
//! current snapshot and a historical series, reconciled from sources of
//! uneven freshness and reliability.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** annual indicators from the World Bank API and monthly
//!   figures from a locally curated dataset
//! - **Normalizing** untrusted observations into ordered numeric series
//! - **Reconciling** them by precedence, with recent curated months
//!   superseding annual figures
//! - **Degrading** to a fallback constant or a flagged synthetic series
//!   instead of ever failing a request
//!
//! ## Architecture
//!
//! Debtwatch follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP routes and response bodies
//! - [`core`] - Normalization, reconciliation, snapshot resolution, backfill
//! - [`adapters`] - External sources (World Bank, curated file)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debtwatch::config::load_config_or_default;
//! use debtwatch::core::DebtService;
//! use debtwatch::domain::Currency;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("debtwatch.toml")?;
//!     let service = DebtService::from_config(&config)?;
//!
//!     let snapshot = service.snapshot(Currency::Usd).await;
//!     println!(
//!         "{:.0} USD ({:.2} per person) as of {} from {}",
//!         snapshot.debt_value, snapshot.per_person, snapshot.period, snapshot.data_source
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Period Ordering
//!
//! Periods are `YYYY` or `YYYY-MM`. A bare year sorts before every month of
//! the same year:
//!
//! ```rust
//! use debtwatch::domain::PeriodKey;
//!
//! let annual: PeriodKey = "2024".parse().unwrap();
//! let july: PeriodKey = "2024-07".parse().unwrap();
//! let next: PeriodKey = "2025".parse().unwrap();
//! assert!(annual < july && july < next);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`] with a [`domain::DebtwatchError`].
//! The public entry points of [`core`] never fail: source errors contribute
//! no data, and anything worse yields the fallback snapshot or a synthetic
//! history flagged `simulated`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
