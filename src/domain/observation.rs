//! Observation and series models
//!
//! Raw payloads enter as [`RawObservation`] or [`MonthlyObservation`], are
//! normalized into [`Observation`], and leave as a [`Series`] of
//! [`HistoryPoint`].

use super::period::PeriodKey;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Unvalidated observation as returned by a source
///
/// `period` is an opaque source-defined key and `value` may be a number, a
/// numeric string, an empty string or null. Everything else the source sends
/// is kept in `source_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "date")]
    pub period: String,

    #[serde(default)]
    pub value: Option<serde_json::Value>,

    #[serde(flatten)]
    pub source_fields: serde_json::Map<String, serde_json::Value>,
}

impl RawObservation {
    /// Create a raw observation without extra source fields
    pub fn new(period: impl Into<String>, value: Option<serde_json::Value>) -> Self {
        Self {
            period: period.into(),
            value,
            source_fields: serde_json::Map::new(),
        }
    }
}

/// Normalized observation: a parsed period and a finite value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: PeriodKey,
    pub value: f64,
}

impl Observation {
    pub fn new(period: PeriodKey, value: f64) -> Self {
        Self { period, value }
    }
}

/// Record from the curated monthly dataset
///
/// `debt` is denominated in the curated currency (EUR); `debt_usd` is an
/// optional pre-converted figure that takes priority over the multiplier.
/// Either may be missing from a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyObservation {
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,

    #[serde(deserialize_with = "string_or_number")]
    pub month: String,

    #[serde(default)]
    pub debt: f64,

    #[serde(rename = "debtUSD", default, skip_serializing_if = "Option::is_none")]
    pub debt_usd: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MonthlyObservation {
    /// Compound period key for this record
    pub fn period(&self) -> Result<PeriodKey, String> {
        PeriodKey::from_str(&format!("{}-{}", self.year.trim(), self.month.trim()))
    }

    /// Debt in USD: the provided figure when positive, otherwise `debt * eur_to_usd`
    pub fn debt_in_usd(&self, eur_to_usd: f64) -> f64 {
        self.debt_usd
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(self.debt * eur_to_usd)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Num(n) => n.to_string(),
    })
}

/// One point of the reconciled history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// Period key; named `year` on the wire for compatibility with chart clients
    pub year: PeriodKey,
    pub debt: f64,
    pub per_person: f64,
    pub population: u64,
}

impl HistoryPoint {
    /// Build a point, deriving the per-capita figure
    pub fn new(period: PeriodKey, debt: f64, population: u64) -> Self {
        Self {
            year: period,
            debt,
            per_person: per_capita(debt, population),
            population,
        }
    }
}

/// `debt / population`, or 0 for an empty population
pub fn per_capita(debt: f64, population: u64) -> f64 {
    if population == 0 {
        0.0
    } else {
        debt / population as f64
    }
}

/// Ordered series with unique periods
///
/// Backed by a `BTreeMap`, so iteration is always ascending under the
/// compound-key ordering and inserting an existing period overwrites it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: BTreeMap<PeriodKey, HistoryPoint>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the point at its period
    pub fn upsert(&mut self, point: HistoryPoint) {
        self.points.insert(point.year, point);
    }

    /// Remove and return the point stored at `period`
    pub fn remove(&mut self, period: &PeriodKey) -> Option<HistoryPoint> {
        self.points.remove(period)
    }

    pub fn get(&self, period: &PeriodKey) -> Option<&HistoryPoint> {
        self.points.get(period)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.values()
    }

    pub fn periods(&self) -> Vec<PeriodKey> {
        self.points.keys().copied().collect()
    }

    pub fn into_points(self) -> Vec<HistoryPoint> {
        self.points.into_values().collect()
    }
}

impl FromIterator<HistoryPoint> for Series {
    fn from_iter<I: IntoIterator<Item = HistoryPoint>>(iter: I) -> Self {
        let mut series = Series::new();
        for point in iter {
            series.upsert(point);
        }
        series
    }
}

/// Year to population mapping with a default estimate
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationIndex {
    by_year: BTreeMap<i32, u64>,
    default_population: u64,
}

impl PopulationIndex {
    /// Build from normalized observations, ignoring non-positive values
    ///
    /// Only bare-year periods are indexed.
    pub fn from_observations(observations: &[Observation], default_population: u64) -> Self {
        let by_year = observations
            .iter()
            .filter(|o| !o.period.is_compound() && o.value.is_finite() && o.value >= 1.0)
            .map(|o| (o.period.year_value(), o.value.round() as u64))
            .collect();
        Self {
            by_year,
            default_population,
        }
    }

    /// Population for `year`, if the source reported one
    pub fn lookup(&self, year: i32) -> Option<u64> {
        self.by_year.get(&year).copied()
    }

    /// Population for `year`, falling back to the default estimate
    pub fn get(&self, year: i32) -> u64 {
        self.lookup(year).unwrap_or(self.default_population)
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}
