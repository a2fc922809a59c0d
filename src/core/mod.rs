//! Core reconciliation logic for debtwatch.
//!
//! # Modules
//!
//! - [`normalize`] - Raw observation cleanup and ordering
//! - [`history`] - History engine: annual series, curated overlay, backfill substitution
//! - [`resolver`] - Snapshot resolver: source precedence for the current figure
//! - [`backfill`] - Synthetic random-walk series
//! - [`boundary`] - Error, panic and time-budget guard around a request
//! - [`settings`] - Engine settings derived from configuration
//! - [`service`] - Wiring of real sources into the engine and resolver
//!
//! # Request Workflow
//!
//! 1. **Fetch**: issue independent source calls concurrently
//! 2. **Normalize**: drop invalid values, sort by period
//! 3. **Reconcile**: merge by precedence (curated over annual from August)
//! 4. **Degrade**: substitute synthetic or fallback figures on failure
//!
//! # Example
//!
//! ```rust,no_run
//! use debtwatch::config::load_config_or_default;
//! use debtwatch::core::DebtService;
//! use debtwatch::domain::Currency;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("debtwatch.toml")?;
//! let service = DebtService::from_config(&config)?;
//!
//! let snapshot = service.snapshot(Currency::Eur).await;
//! println!("{} {} ({})", snapshot.debt_value, snapshot.currency, snapshot.data_source);
//!
//! let history = service.history().await;
//! println!("{} points, simulated: {}", history.points.len(), history.simulated);
//! # Ok(())
//! # }
//! ```

pub mod backfill;
pub mod boundary;
pub mod history;
pub mod normalize;
pub mod resolver;
pub mod service;
pub mod settings;

pub use backfill::Backfill;
pub use history::{History, HistoryEngine};
pub use normalize::{latest_valid, normalize, normalize_observations};
pub use resolver::{DebtFigure, SnapshotResolver};
pub use service::DebtService;
pub use settings::EngineSettings;

use chrono::Datelike;

/// Current calendar year in UTC
pub(crate) fn current_year() -> i32 {
    chrono::Utc::now().year()
}
