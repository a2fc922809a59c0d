//! Debt service - wires sources into the history engine and snapshot resolver
//!
//! Holds only read-only state, so one instance is shared across every
//! request handler behind an `Arc`.

use super::history::{History, HistoryEngine};
use super::resolver::SnapshotResolver;
use super::settings::EngineSettings;
use crate::adapters::curated::CuratedDataset;
use crate::adapters::worldbank::WorldBankClient;
use crate::adapters::{CuratedSource, IndicatorSource};
use crate::config::DebtwatchConfig;
use crate::domain::{Currency, CurrentSnapshot, ExchangeRates, Result};
use std::sync::Arc;

pub struct DebtService {
    history: HistoryEngine,
    resolver: SnapshotResolver,
    settings: Arc<EngineSettings>,
}

impl DebtService {
    /// Create a service backed by the World Bank API and the curated file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built or
    /// the fallback figures are invalid.
    pub fn from_config(config: &DebtwatchConfig) -> Result<Self> {
        let settings = EngineSettings::from_config(config)?;
        let indicators = Arc::new(WorldBankClient::new(&config.worldbank)?);
        let curated = Arc::new(CuratedDataset::new(&config.curated.path));

        tracing::debug!(
            base_url = %indicators.base_url(),
            country = %settings.country_code,
            curated = %curated.path().display(),
            "Debt service configured"
        );

        Ok(Self::new(indicators, curated, settings))
    }

    /// Create a service over arbitrary sources
    pub fn new(
        indicators: Arc<dyn IndicatorSource>,
        curated: Arc<dyn CuratedSource>,
        settings: EngineSettings,
    ) -> Self {
        let settings = Arc::new(settings);
        Self {
            history: HistoryEngine::new(indicators.clone(), curated.clone(), settings.clone()),
            resolver: SnapshotResolver::new(indicators, curated, settings.clone()),
            settings,
        }
    }

    pub fn rates(&self) -> &ExchangeRates {
        &self.settings.rates
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn history_engine(&self) -> &HistoryEngine {
        &self.history
    }

    pub fn resolver(&self) -> &SnapshotResolver {
        &self.resolver
    }

    /// Reconciled history; never fails
    pub async fn history(&self) -> History {
        self.history.build_history().await
    }

    /// Current snapshot in `currency`; never fails
    pub async fn snapshot(&self, currency: Currency) -> CurrentSnapshot {
        self.resolver
            .resolve_snapshot()
            .await
            .in_currency(&self.settings.rates, currency, &self.settings.fallback)
    }
}
