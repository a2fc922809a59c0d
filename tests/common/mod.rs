//! In-memory sources shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use debtwatch::adapters::{CuratedSource, IndicatorSource, YearRange};
use debtwatch::core::{DebtService, EngineSettings};
use debtwatch::domain::{MonthlyObservation, RawObservation, SourceError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEBT: &str = "DT.DOD.DECT.CD";
pub const DEBT_PCT_GDP: &str = "GC.DOD.TOTL.GD.ZS";
pub const GDP: &str = "NY.GDP.MKTP.CD";
pub const POPULATION: &str = "SP.POP.TOTL";

/// Indicator source answering from a fixed table
#[derive(Default)]
pub struct StubIndicators {
    series: HashMap<String, Vec<RawObservation>>,
    failing: Vec<String>,
    delay: Option<Duration>,
    panics: bool,
}

impl StubIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an indicator; entries are `(period, value)` with `Value::Null` for gaps
    pub fn with(mut self, indicator: &str, entries: &[(&str, Value)]) -> Self {
        let raw = entries
            .iter()
            .map(|(period, value)| {
                let value = if value.is_null() { None } else { Some(value.clone()) };
                RawObservation::new(*period, value)
            })
            .collect();
        self.series.insert(indicator.to_string(), raw);
        self
    }

    pub fn failing(mut self, indicator: &str) -> Self {
        self.failing.push(indicator.to_string());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }
}

#[async_trait]
impl IndicatorSource for StubIndicators {
    fn name(&self) -> &str {
        "stub"
    }

    async fn try_fetch_series(
        &self,
        indicator: &str,
        _country: &str,
        _range: YearRange,
    ) -> Result<Vec<RawObservation>, SourceError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panics {
            panic!("stub source exploded");
        }
        if self.failing.iter().any(|f| f == indicator) {
            return Err(SourceError::ConnectionFailed("stub refused".to_string()));
        }
        Ok(self.series.get(indicator).cloned().unwrap_or_default())
    }
}

/// Curated source over a fixed list
#[derive(Default)]
pub struct StubCurated {
    records: Vec<MonthlyObservation>,
}

impl StubCurated {
    pub fn new(records: Vec<MonthlyObservation>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CuratedSource for StubCurated {
    async fn load_curated_series(&self) -> Vec<MonthlyObservation> {
        self.records.clone()
    }
}

/// Curated record with an explicit USD figure
pub fn monthly_usd(year: &str, month: &str, debt_usd: f64) -> MonthlyObservation {
    MonthlyObservation {
        year: year.to_string(),
        month: month.to_string(),
        debt: debt_usd / 1.08,
        debt_usd: Some(debt_usd),
        note: None,
    }
}

/// Curated record in EUR only
pub fn monthly_eur(year: &str, month: &str, debt: f64) -> MonthlyObservation {
    MonthlyObservation {
        year: year.to_string(),
        month: month.to_string(),
        debt,
        debt_usd: None,
        note: None,
    }
}

pub fn num(value: f64) -> Value {
    json!(value)
}

pub fn service(indicators: StubIndicators, curated: StubCurated) -> DebtService {
    service_with(indicators, curated, EngineSettings::default())
}

pub fn service_with(
    indicators: StubIndicators,
    curated: StubCurated,
    settings: EngineSettings,
) -> DebtService {
    DebtService::new(Arc::new(indicators), Arc::new(curated), settings)
}
