//! Synthetic backfill
//!
//! Last-resort placeholder series used when the reconciled history is too
//! sparse to chart. Every series produced here is served with
//! `simulated: true`.

use crate::config::ReconciliationConfig;
use crate::domain::{HistoryPoint, PeriodKey};
use rand::Rng;

/// Bounded random-walk generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backfill {
    /// Half-width of the yearly debt change, 0.05 = +/-5%
    pub band: f64,
    /// Population multiplier applied per year going forward
    pub population_decline: f64,
}

impl Default for Backfill {
    fn default() -> Self {
        Self::from_policy(&ReconciliationConfig::default())
    }
}

impl Backfill {
    pub fn from_policy(policy: &ReconciliationConfig) -> Self {
        Self {
            band: policy.backfill_band,
            population_decline: policy.population_decline,
        }
    }

    /// Generate `count` consecutive yearly points ending at `base_year`
    ///
    /// The last point carries `base_value` and `base_population` exactly.
    /// Walking back, each earlier year's debt differs from the next by a
    /// factor drawn uniformly from `[1 - band, 1 + band]`, and population
    /// grows by `1 / population_decline` per year. Debt and population are
    /// rounded to integers and per-capita figures to cents.
    pub fn generate_series<R: Rng>(
        &self,
        rng: &mut R,
        base_value: f64,
        base_year: i32,
        base_population: u64,
        count: usize,
    ) -> Vec<HistoryPoint> {
        let mut points = Vec::with_capacity(count);
        let mut debt = base_value;

        for offset in 0..count {
            let year = base_year - offset as i32;
            let population =
                (base_population as f64 / self.population_decline.powi(offset as i32)).round();
            points.push(synthetic_point(year, debt.round(), population as u64));

            let factor = rng.gen_range((1.0 - self.band)..=(1.0 + self.band));
            debt /= factor;
        }

        points.reverse();
        points
    }
}

fn synthetic_point(year: i32, debt: f64, population: u64) -> HistoryPoint {
    let mut point = HistoryPoint::new(PeriodKey::year(year), debt, population);
    point.per_person = (point.per_person * 100.0).round() / 100.0;
    point
}
