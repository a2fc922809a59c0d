//! Series normalizer
//!
//! Turns untrusted [`RawObservation`]s into ascending, numeric
//! [`Observation`]s. Pure and idempotent.

use crate::domain::{Observation, PeriodKey, RawObservation};
use serde_json::Value;
use std::str::FromStr;

/// Numeric value of a raw field, if it has one
///
/// Numbers and numeric strings are accepted; null, empty strings, booleans,
/// NaN and infinities are not.
fn numeric_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Normalize raw source observations
///
/// Drops entries with a missing, empty, non-numeric or non-finite value and
/// entries whose period does not parse, then sorts ascending. When a period
/// appears twice the first valid occurrence in source order wins.
pub fn normalize(raw: &[RawObservation]) -> Vec<Observation> {
    let observations: Vec<Observation> = raw
        .iter()
        .filter_map(|obs| {
            let value = numeric_value(obs.value.as_ref()?)?;
            let period = PeriodKey::from_str(&obs.period).ok()?;
            Some(Observation::new(period, value))
        })
        .collect();
    normalize_observations(observations)
}

/// Re-normalize already typed observations
///
/// Applying this to the output of [`normalize`] returns it unchanged.
pub fn normalize_observations(mut observations: Vec<Observation>) -> Vec<Observation> {
    observations.retain(|o| o.value.is_finite());
    // Stable sort keeps source order among equal periods for the dedup below
    observations.sort_by_key(|o| o.period);
    observations.dedup_by_key(|o| o.period);
    observations
}

/// Most recent observation with a valid value
///
/// Walks periods from newest to oldest and returns the first valid one, so a
/// trailing null period yields the next older figure rather than nothing.
pub fn latest_valid(raw: &[RawObservation]) -> Option<Observation> {
    normalize(raw).last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(period: &str, value: Value) -> RawObservation {
        RawObservation::new(period, if value.is_null() { None } else { Some(value) })
    }

    fn sample() -> Vec<RawObservation> {
        vec![
            raw("2024", Value::Null),
            raw("2021", json!(41_000_000_000.0)),
            raw("2023", json!("45200000000")),
            raw("2022", json!("")),
            raw("2020", json!("n/a")),
            raw("2019", json!(true)),
            raw("20x8", json!(1.0)),
            raw("2018", json!(38_500_000_000u64)),
        ]
    }

    #[test]
    fn test_normalize_filters_invalid_values() {
        let normalized = normalize(&sample());
        let periods: Vec<String> = normalized.iter().map(|o| o.period.to_string()).collect();
        assert_eq!(periods, vec!["2018", "2021", "2023"]);
        assert!(normalized.iter().all(|o| o.value.is_finite()));
        assert_eq!(normalized[2].value, 45_200_000_000.0);
    }

    #[test]
    fn test_normalize_sorts_ascending() {
        let normalized = normalize(&sample());
        assert!(normalized.windows(2).all(|w| w[0].period < w[1].period));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&sample());
        let twice = normalize_observations(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_duplicate_periods_keep_first_valid() {
        let input = vec![
            raw("2020", Value::Null),
            raw("2020", json!(1.0)),
            raw("2020", json!(2.0)),
        ];
        let normalized = normalize(&input);
        assert_eq!(normalized, vec![Observation::new(PeriodKey::year(2020), 1.0)]);
    }

    #[test]
    fn test_normalize_rejects_non_finite_strings() {
        let input = vec![raw("2020", json!("NaN")), raw("2021", json!("inf"))];
        assert!(normalize(&input).is_empty());
    }

    #[test]
    fn test_latest_valid_skips_trailing_null() {
        let input = vec![
            raw("2025", Value::Null),
            raw("2024", json!(null)),
            raw("2023", json!(47_100_000_000.0)),
            raw("2022", json!(44_000_000_000.0)),
        ];
        let latest = latest_valid(&input).unwrap();
        assert_eq!(latest.period, PeriodKey::year(2023));
        assert_eq!(latest.value, 47_100_000_000.0);
    }

    #[test]
    fn test_latest_valid_empty() {
        assert!(latest_valid(&[]).is_none());
        assert!(latest_valid(&[raw("2024", Value::Null)]).is_none());
    }
}
