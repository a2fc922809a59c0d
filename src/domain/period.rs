//! Period keys for annual and monthly observations
//!
//! A [`PeriodKey`] is either a bare year (`2024`) or a compound year-month
//! key (`2024-08`). Keys order the way their digits do once the separator is
//! stripped and the month is zero-padded, which puts a compound key after the
//! bare year it belongs to and before the next year:
//!
//! ```
//! use debtwatch::domain::PeriodKey;
//! use std::str::FromStr;
//!
//! let keys: Vec<PeriodKey> = ["2024", "2024-07", "2024-12", "2025"]
//!     .iter()
//!     .map(|s| PeriodKey::from_str(s).unwrap())
//!     .collect();
//! assert!(keys.windows(2).all(|w| w[0] < w[1]));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Annual or monthly period identifier
///
/// Field order matters: the derived `Ord` compares the year first and then the
/// month, with a missing month ranking below every present month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey {
    year: i32,
    month: Option<u8>,
}

impl PeriodKey {
    /// Creates a bare year key
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    /// Creates a compound year-month key
    ///
    /// # Errors
    ///
    /// Returns an error if the month is outside `1..=12` or the year does not
    /// have four digits.
    pub fn year_month(year: i32, month: u8) -> Result<Self, String> {
        validate_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month must be between 1 and 12, got {month}"));
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    /// Calendar year of the period
    pub fn year_value(&self) -> i32 {
        self.year
    }

    /// Month of the period, if it is a compound key
    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// Whether this key carries a month
    pub fn is_compound(&self) -> bool {
        self.month.is_some()
    }

    /// The bare year key this period belongs to
    pub fn bare_year(&self) -> Self {
        Self::year(self.year)
    }

    /// Year-month pair used by the precedence rules, with a missing month as 0
    pub fn chronological(&self) -> (i32, u8) {
        (self.year, self.month.unwrap_or(0))
    }
}

fn validate_year(year: i32) -> Result<(), String> {
    if !(1000..=9999).contains(&year) {
        return Err(format!("Year must have four digits, got {year}"));
    }
    Ok(())
}

fn parse_year(s: &str) -> Result<i32, String> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid year '{s}'"));
    }
    let year: i32 = s.parse().map_err(|_| format!("Invalid year '{s}'"))?;
    validate_year(year)?;
    Ok(year)
}

fn parse_month(s: &str) -> Result<u8, String> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid month '{s}'"));
    }
    s.parse().map_err(|_| format!("Invalid month '{s}'"))
}

impl FromStr for PeriodKey {
    type Err = String;

    /// Accepts `YYYY`, `YYYY-MM`, `YYYY-M` and `YYYYMM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((year, month)) = s.split_once('-') {
            return Self::year_month(parse_year(year)?, parse_month(month)?);
        }
        match s.len() {
            4 => Ok(Self::year(parse_year(s)?)),
            6 => Self::year_month(parse_year(&s[..4])?, parse_month(&s[4..])?),
            _ => Err(format!("Unrecognized period key '{s}'")),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{:04}-{:02}", self.year, month),
            None => write!(f, "{:04}", self.year),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PeriodKey::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn key(s: &str) -> PeriodKey {
        PeriodKey::from_str(s).unwrap()
    }

    #[test_case("2024", "2024-07" ; "bare year before its months")]
    #[test_case("2024-07", "2024-12" ; "months in order")]
    #[test_case("2024-12", "2025" ; "december before next year")]
    #[test_case("2024", "2025" ; "years in order")]
    #[test_case("2024-12", "2025-08" ; "compound across years")]
    fn test_period_ordering(lower: &str, higher: &str) {
        assert!(key(lower) < key(higher));
    }

    #[test_case("2024-08", 2024, Some(8))]
    #[test_case("2024-8", 2024, Some(8))]
    #[test_case("202408", 2024, Some(8))]
    #[test_case(" 2023 ", 2023, None)]
    fn test_parse_accepted_forms(input: &str, year: i32, month: Option<u8>) {
        let parsed = key(input);
        assert_eq!(parsed.year_value(), year);
        assert_eq!(parsed.month(), month);
    }

    #[test_case("" ; "empty")]
    #[test_case("24" ; "short year")]
    #[test_case("2024-13" ; "month too large")]
    #[test_case("2024-00" ; "month zero")]
    #[test_case("abcd" ; "not digits")]
    #[test_case("2024-" ; "missing month")]
    fn test_parse_rejected_forms(input: &str) {
        assert!(PeriodKey::from_str(input).is_err());
    }

    #[test]
    fn test_display_zero_pads_month() {
        assert_eq!(PeriodKey::year_month(2025, 8).unwrap().to_string(), "2025-08");
        assert_eq!(PeriodKey::year(2025).to_string(), "2025");
    }

    #[test]
    fn test_bare_year_strips_month() {
        let compound = key("2025-08");
        assert_eq!(compound.bare_year(), key("2025"));
        assert!(compound.is_compound());
        assert!(!compound.bare_year().is_compound());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&key("2024-07")).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: PeriodKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-07"));
    }
}
