//! Logging and observability
//!
//! Structured logging through `tracing`, with console output and optional
//! rotated JSON files. The macros below keep source and precedence events
//! uniform across the adapters and resolvers.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an upstream source that contributed nothing
///
/// # Example
///
/// ```no_run
/// use debtwatch::log_source_unavailable;
/// use debtwatch::domain::SourceError;
///
/// let error = SourceError::Timeout("8s elapsed".to_string());
/// log_source_unavailable!("worldbank", "DT.DOD.DECT.CD", &error);
/// ```
#[macro_export]
macro_rules! log_source_unavailable {
    ($source:expr, $series:expr, $error:expr) => {
        tracing::warn!(
            source = $source,
            series = %$series,
            error = %$error,
            "Source unavailable, contributing no data"
        );
    };
}

/// Log which source won a precedence decision
///
/// # Example
///
/// ```no_run
/// use debtwatch::log_source_selected;
/// use debtwatch::domain::{DataSource, PeriodKey};
///
/// log_source_selected!(DataSource::Curated, PeriodKey::year(2025), 5.7e10);
/// ```
#[macro_export]
macro_rules! log_source_selected {
    ($source:expr, $period:expr, $value:expr) => {
        tracing::info!(
            data_source = %$source,
            period = %$period,
            value = $value,
            "Source selected"
        );
    };
}
