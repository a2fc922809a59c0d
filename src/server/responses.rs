//! JSON response bodies
//!
//! Field names are camelCase to match existing chart clients.

use crate::core::History;
use crate::domain::{CurrentSnapshot, HistoryPoint};
use serde::Serialize;

/// Body of `GET /debt`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtResponse {
    pub total_debt: f64,
    pub population: u64,
    pub per_person: f64,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// `YYYY` or `YYYY-MM`
    pub date: String,
    pub currency: String,
    pub success: bool,
    pub data_source: String,
    pub is_real_time: bool,
    pub is_newer_data: bool,
    pub data_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<CurrentSnapshot> for DebtResponse {
    fn from(snapshot: CurrentSnapshot) -> Self {
        let year = snapshot.period.year_value().to_string();
        Self {
            total_debt: snapshot.debt_value,
            population: snapshot.population,
            per_person: snapshot.per_person,
            year: year.clone(),
            month: snapshot.period.month().map(|m| format!("{m:02}")),
            date: snapshot.period.to_string(),
            currency: snapshot.currency,
            success: true,
            data_source: snapshot.data_source.as_str().to_string(),
            is_real_time: snapshot.is_real_time,
            is_newer_data: snapshot.is_newer_than_fallback,
            data_year: year,
            warning: snapshot.warning,
        }
    }
}

/// Body of `GET /debt/history`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryPoint>,
    pub success: bool,
    /// Present, and `true`, only for synthetic series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated: Option<bool>,
}

impl From<History> for HistoryResponse {
    fn from(history: History) -> Self {
        Self {
            history: history.points,
            success: true,
            simulated: history.simulated.then_some(true),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
