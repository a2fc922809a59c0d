//! History reconciliation
//!
//! Builds the chartable debt series: annual World Bank figures joined with
//! population, overlaid with curated monthly releases, and replaced by a
//! synthetic series when too sparse.
//!
//! A curated point replaces the annual figure of its own year only from the
//! supersede month onwards (August by default). Earlier months of a year that
//! already has an annual figure are dropped.

use super::backfill::Backfill;
use super::boundary::guarded;
use super::normalize::normalize;
use super::settings::EngineSettings;
use crate::adapters::{CuratedSource, IndicatorSource, YearRange};
use crate::domain::{
    DebtwatchError, HistoryPoint, MonthlyObservation, Observation, PopulationIndex, Result,
    Series,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;

/// Reconciled history series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    pub points: Vec<HistoryPoint>,
    /// Set when the points are synthetic placeholders
    pub simulated: bool,
}

/// Join annual debt observations with population by exact year
pub fn build_base_series(debt: &[Observation], population: &PopulationIndex) -> Series {
    debt.iter()
        .map(|obs| {
            HistoryPoint::new(
                obs.period,
                obs.value,
                population.get(obs.period.year_value()),
            )
        })
        .collect()
}

/// Overlay curated monthly records onto a base series
///
/// Records are applied in input order. A record whose year has an annual
/// entry replaces that entry when `(year, month) >= (year, supersede_month)`
/// and is otherwise dropped. A record whose year has no annual entry is
/// inserted at its compound key, overwriting an earlier record of the same
/// month.
pub fn merge_curated(
    mut series: Series,
    curated: &[MonthlyObservation],
    population: &PopulationIndex,
    eur_to_usd: f64,
    supersede_month: u8,
) -> Series {
    for record in curated {
        let Ok(period) = record.period() else {
            continue;
        };
        let point = HistoryPoint::new(
            period,
            record.debt_in_usd(eur_to_usd),
            population.get(period.year_value()),
        );

        let annual = period.bare_year();
        if series.get(&annual).is_some() {
            if period.chronological() >= (annual.year_value(), supersede_month) {
                tracing::debug!(period = %period, "Curated point supersedes annual figure");
                series.remove(&annual);
                series.upsert(point);
            } else {
                tracing::debug!(period = %period, "Annual figure kept over earlier curated month");
            }
        } else {
            series.upsert(point);
        }
    }
    series
}

fn check_finite(series: &Series) -> Result<()> {
    match series
        .iter()
        .find(|p| !p.debt.is_finite() || !p.per_person.is_finite())
    {
        Some(point) => Err(DebtwatchError::Reconciliation(format!(
            "non-finite value at {}",
            point.year
        ))),
        None => Ok(()),
    }
}

/// History engine over an indicator source and a curated source
pub struct HistoryEngine {
    indicators: Arc<dyn IndicatorSource>,
    curated: Arc<dyn CuratedSource>,
    settings: Arc<EngineSettings>,
}

impl HistoryEngine {
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

    /// Build the history, never failing
    ///
    /// Errors, panics and an exceeded request budget are logged and yield
    /// the synthetic series.
    pub async fn build_history(&self) -> History {
        self.build_history_at(super::current_year()).await
    }

    /// [`build_history`](Self::build_history) with an explicit current year
    pub async fn build_history_at(&self, current_year: i32) -> History {
        match guarded(
            self.settings.request_budget,
            self.try_build_history(current_year),
        )
        .await
        {
            Ok(history) => history,
            Err(failure) => {
                tracing::error!(error = %failure, "History build failed, serving synthetic series");
                self.synthetic_history()
            }
        }
    }

    /// Fetch, normalize, join and merge
    ///
    /// Source failures contribute nothing and are not errors here.
    ///
    /// # Errors
    ///
    /// Returns a reconciliation error if the merged series holds a
    /// non-finite value.
    pub async fn try_build_history(&self, current_year: i32) -> Result<History> {
        let settings = &self.settings;
        let range = YearRange::through_lookahead(
            settings.history_start_year,
            current_year,
            settings.lookahead_years,
        );
        let country = settings.country_code.as_str();

        let (debt_raw, population_raw, curated) = tokio::join!(
            self.indicators
                .fetch_indicator_series(&settings.indicators.external_debt, country, range),
            self.indicators
                .fetch_indicator_series(&settings.indicators.population, country, range),
            self.curated.load_curated_series(),
        );

        let debt = normalize(&debt_raw);
        let population =
            PopulationIndex::from_observations(&normalize(&population_raw), settings.fallback.population);

        tracing::debug!(
            debt_points = debt.len(),
            population_points = population.len(),
            curated_points = curated.len(),
            "Sources fetched for history"
        );

        let merged = merge_curated(
            build_base_series(&debt, &population),
            &curated,
            &population,
            settings.rates.eur_to_usd,
            settings.policy.annual_supersede_month,
        );
        check_finite(&merged)?;

        if merged.len() < settings.policy.min_history_points {
            tracing::info!(
                points = merged.len(),
                min_points = settings.policy.min_history_points,
                "Insufficient history, serving synthetic series"
            );
            return Ok(self.synthetic_history());
        }

        Ok(History {
            points: merged.into_points(),
            simulated: false,
        })
    }

    /// Synthetic series anchored at the fallback constant
    pub fn synthetic_history(&self) -> History {
        self.synthetic_history_with(&mut StdRng::from_entropy())
    }

    pub fn synthetic_history_with<R: Rng>(&self, rng: &mut R) -> History {
        let fallback = &self.settings.fallback;
        let points = Backfill::from_policy(&self.settings.policy).generate_series(
            rng,
            fallback.debt_value,
            fallback.period.year_value(),
            fallback.population,
            self.settings.policy.backfill_points,
        );
        History {
            points,
            simulated: true,
        }
    }
}
