//! Current-value snapshot resolution
//!
//! Precedence, first success wins:
//!
//! 1. the latest curated record with a positive USD debt
//! 2. the primary debt indicator, most recent valid period
//! 3. percent-of-GDP combined with GDP
//! 4. the fallback constant
//!
//! Population is fetched alongside the debt chain. When it cannot be
//! resolved the whole figure reverts to the fallback constant, keeping the
//! tag of the debt source that won.

use super::boundary::guarded;
use super::normalize::normalize;
use super::settings::EngineSettings;
use crate::adapters::{CuratedSource, IndicatorSource, YearRange};
use crate::domain::{
    per_capita, CurrentSnapshot, DataSource, DebtwatchError, FallbackConstant, MonthlyObservation,
    Observation, PeriodKey, Result,
};
use crate::log_source_selected;
use std::sync::Arc;

const POPULATION_REVERT_WARNING: &str =
    "Population data unavailable; debt, population and period reverted to the fallback figures";

const BOUNDARY_WARNING: &str = "Live data could not be resolved; serving the fallback figures";

/// A debt figure together with the source that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtFigure {
    pub value: f64,
    pub period: PeriodKey,
    pub source: DataSource,
}

fn usable_debt(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Latest curated record, by period, whose USD debt is positive
pub fn latest_curated(records: &[MonthlyObservation], eur_to_usd: f64) -> Option<DebtFigure> {
    records
        .iter()
        .filter_map(|record| {
            let period = record.period().ok()?;
            let value = record.debt_in_usd(eur_to_usd);
            usable_debt(value).then_some(DebtFigure {
                value,
                period,
                source: DataSource::Curated,
            })
        })
        .max_by_key(|figure| figure.period)
}

/// Debt from the most recent percent-of-GDP point and GDP
///
/// GDP is taken from the same period when present, otherwise from its own
/// most recent point. Inputs must be normalized (ascending).
pub fn derive_from_gdp_share(percent: &[Observation], gdp: &[Observation]) -> Option<Observation> {
    let share = percent.last()?;
    if share.value == 0.0 {
        return None;
    }
    let gdp_point = gdp
        .iter()
        .rev()
        .find(|o| o.period == share.period)
        .or_else(|| gdp.last())?;
    Some(Observation::new(share.period, gdp_point.value * share.value / 100.0))
}

/// Population for the year of the resolved debt period
///
/// Prefers the exact-year observation, otherwise the most recent one. A
/// zero is returned as is; callers decide whether it is usable. Inputs must
/// be normalized (ascending).
pub fn select_population(population: &[Observation], debt_year: i32) -> Option<u64> {
    population
        .iter()
        .rev()
        .find(|o| o.period.year_value() == debt_year)
        .or_else(|| population.last())
        .map(|o| o.value.max(0.0).round() as u64)
}

/// Whether a resolved period is newer than the fallback and current
pub fn is_newer_than_fallback(
    period: PeriodKey,
    fallback: &FallbackConstant,
    current_year: i32,
) -> bool {
    period.chronological() > fallback.period.chronological() && period.year_value() >= current_year
}

/// Snapshot resolver over an indicator source and a curated source
pub struct SnapshotResolver {
    indicators: Arc<dyn IndicatorSource>,
    curated: Arc<dyn CuratedSource>,
    settings: Arc<EngineSettings>,
}

impl SnapshotResolver {
    pub fn new(
        indicators: Arc<dyn IndicatorSource>,
        curated: Arc<dyn CuratedSource>,
        settings: Arc<EngineSettings>,
    ) -> Self {
        Self {
            indicators,
            curated,
            settings,
        }
    }

    /// Resolve the current snapshot in USD, never failing
    pub async fn resolve_snapshot(&self) -> CurrentSnapshot {
        self.resolve_snapshot_at(super::current_year()).await
    }

    /// [`resolve_snapshot`](Self::resolve_snapshot) with an explicit current year
    pub async fn resolve_snapshot_at(&self, current_year: i32) -> CurrentSnapshot {
        match guarded(self.settings.request_budget, self.try_resolve(current_year)).await {
            Ok(snapshot) => snapshot,
            Err(failure) => {
                tracing::error!(error = %failure, "Snapshot resolution failed, serving fallback");
                CurrentSnapshot::from_fallback(
                    &self.settings.fallback,
                    DataSource::Fallback,
                    Some(BOUNDARY_WARNING.to_string()),
                )
            }
        }
    }

    /// Walk the precedence chain and settle debt and population
    ///
    /// # Errors
    ///
    /// Returns a reconciliation error if the settled per-capita figure is
    /// not finite.
    pub async fn try_resolve(&self, current_year: i32) -> Result<CurrentSnapshot> {
        let settings = &self.settings;
        let range = YearRange::through_lookahead(
            settings.snapshot_start_year,
            current_year,
            settings.lookahead_years,
        );

        let (debt, population_raw) = tokio::join!(
            self.resolve_debt(range),
            self.indicators.fetch_indicator_series(
                &settings.indicators.population,
                &settings.country_code,
                range
            ),
        );

        let Some(debt) = debt else {
            tracing::warn!("No source produced a debt figure, serving fallback");
            return Ok(CurrentSnapshot::from_fallback(
                &settings.fallback,
                DataSource::Fallback,
                None,
            ));
        };

        let Some(population) =
            select_population(&normalize(&population_raw), debt.period.year_value())
                .filter(|&population| population >= 1)
        else {
            tracing::warn!(
                data_source = %debt.source,
                "Population unavailable, reverting to fallback figures"
            );
            return Ok(CurrentSnapshot::from_fallback(
                &settings.fallback,
                debt.source,
                Some(POPULATION_REVERT_WARNING.to_string()),
            ));
        };

        let per_person = per_capita(debt.value, population);
        if !per_person.is_finite() {
            return Err(DebtwatchError::Reconciliation(format!(
                "non-finite per-capita debt for {}",
                debt.period
            )));
        }

        Ok(CurrentSnapshot {
            debt_value: debt.value,
            population,
            per_person,
            period: debt.period,
            currency: "USD".to_string(),
            data_source: debt.source,
            is_real_time: debt.source.is_real_time(),
            is_newer_than_fallback: is_newer_than_fallback(
                debt.period,
                &settings.fallback,
                current_year,
            ),
            warning: None,
        })
    }

    async fn resolve_debt(&self, range: YearRange) -> Option<DebtFigure> {
        let settings = &self.settings;
        let country = settings.country_code.as_str();

        let curated = self.curated.load_curated_series().await;
        if let Some(figure) = latest_curated(&curated, settings.rates.eur_to_usd) {
            log_source_selected!(figure.source, figure.period, figure.value);
            return Some(figure);
        }

        let primary = normalize(
            &self
                .indicators
                .fetch_indicator_series(&settings.indicators.external_debt, country, range)
                .await,
        );
        match primary.last() {
            Some(latest) if usable_debt(latest.value) => {
                log_source_selected!(DataSource::WorldBank, latest.period, latest.value);
                return Some(DebtFigure {
                    value: latest.value,
                    period: latest.period,
                    source: DataSource::WorldBank,
                });
            }
            Some(latest) => {
                tracing::debug!(period = %latest.period, value = latest.value, "Primary debt not positive");
            }
            None => {}
        }

        let (percent_raw, gdp_raw) = tokio::join!(
            self.indicators
                .fetch_indicator_series(&settings.indicators.debt_pct_gdp, country, range),
            self.indicators
                .fetch_indicator_series(&settings.indicators.gdp, country, range),
        );
        let derived = derive_from_gdp_share(&normalize(&percent_raw), &normalize(&gdp_raw))
            .filter(|o| usable_debt(o.value))?;
        log_source_selected!(DataSource::WorldBankDerived, derived.period, derived.value);
        Some(DebtFigure {
            value: derived.value,
            period: derived.period,
            source: DataSource::WorldBankDerived,
        })
    }
}
