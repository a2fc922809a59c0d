//! Domain models and types for debtwatch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Period keys** ([`PeriodKey`]) with the compound year-month ordering
//! - **Observation models** ([`RawObservation`], [`Observation`], [`MonthlyObservation`])
//! - **Series models** ([`Series`], [`HistoryPoint`], [`PopulationIndex`])
//! - **Snapshot models** ([`CurrentSnapshot`], [`FallbackConstant`], [`DataSource`])
//! - **Currency conversion** ([`ExchangeRates`])
//! - **Error types** ([`DebtwatchError`], [`SourceError`]) and the [`Result`] alias
//!
//! All values are immutable records produced fresh for every request.

pub mod currency;
pub mod errors;
pub mod observation;
pub mod period;
pub mod result;
pub mod snapshot;

pub use currency::{Currency, ExchangeRates};
pub use errors::{DebtwatchError, SourceError};
pub use observation::{
    per_capita, HistoryPoint, MonthlyObservation, Observation, PopulationIndex, RawObservation,
    Series,
};
pub use period::PeriodKey;
pub use result::Result;
pub use snapshot::{CurrentSnapshot, DataSource, FallbackConstant};
