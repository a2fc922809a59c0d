//! External source integrations for debtwatch.
//!
//! - [`worldbank`] - World Bank indicators API (annual, paginated, date-ranged)
//! - [`curated`] - locally curated monthly releases read from a JSON file
//!
//! # Design Pattern
//!
//! Each source sits behind a trait so the reconciliation engine and the
//! snapshot resolver can be exercised with in-memory sources. The fallible
//! `try_*` methods return a [`SourceError`]; the provided wrappers log the
//! failure and contribute an empty sequence instead, which is all the
//! reconciliation layer ever sees.
//!
//! ```rust,no_run
//! use debtwatch::adapters::{IndicatorSource, YearRange};
//! use debtwatch::adapters::worldbank::WorldBankClient;
//! use debtwatch::config::WorldBankConfig;
//!
//! # async fn example() -> debtwatch::domain::Result<()> {
//! let client = WorldBankClient::new(&WorldBankConfig::default())?;
//! let range = YearRange::through_lookahead(2010, 2026, 1);
//! let raw = client.fetch_indicator_series("SP.POP.TOTL", "BGR", range).await;
//! println!("{} population observations", raw.len());
//! # Ok(())
//! # }
//! ```

pub mod curated;
pub mod worldbank;

use crate::domain::{MonthlyObservation, RawObservation, SourceError};
use crate::log_source_unavailable;
use async_trait::async_trait;
use std::fmt;

/// Inclusive range of years requested from a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Range from `start` through `current_year + lookahead`
    ///
    /// Asking past the current year picks up figures published early.
    pub fn through_lookahead(start: i32, current_year: i32, lookahead: i32) -> Self {
        Self::new(start, current_year + lookahead.max(1))
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Indicator-based statistical source
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch every observation of `indicator` for `country` within `range`
    async fn try_fetch_series(
        &self,
        indicator: &str,
        country: &str,
        range: YearRange,
    ) -> Result<Vec<RawObservation>, SourceError>;

    /// Like [`try_fetch_series`](Self::try_fetch_series), but any failure
    /// is logged and yields an empty sequence
    async fn fetch_indicator_series(
        &self,
        indicator: &str,
        country: &str,
        range: YearRange,
    ) -> Vec<RawObservation> {
        match self.try_fetch_series(indicator, country, range).await {
            Ok(observations) => observations,
            Err(e) => {
                log_source_unavailable!(self.name(), indicator, &e);
                Vec::new()
            }
        }
    }
}

/// Source of curated monthly figures
#[async_trait]
pub trait CuratedSource: Send + Sync {
    /// Read every valid curated record; absent or unreadable data yields an empty sequence
    async fn load_curated_series(&self) -> Vec<MonthlyObservation>;
}
