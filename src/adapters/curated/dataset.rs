//! Curated monthly dataset file
//!
//! Expected shape:
//!
//! ```json
//! { "data": [ { "year": "2025", "month": "08", "debt": 53605900000, "debtUSD": 57894000000, "note": "..." } ] }
//! ```
//!
//! The file is re-read on every call so a new release can be dropped in
//! without restarting the service.

use crate::adapters::CuratedSource;
use crate::domain::{DebtwatchError, MonthlyObservation, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CuratedFile {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

/// JSON-file backed curated source
#[derive(Debug, Clone)]
pub struct CuratedDataset {
    path: PathBuf,
}

impl CuratedDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    /// Individual records that fail to decode are skipped, not reported.
    pub async fn try_load(&self) -> Result<Vec<MonthlyObservation>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        parse_curated(&contents)
    }
}

/// Decode curated JSON, keeping every record with a valid period and finite debt
pub fn parse_curated(contents: &str) -> Result<Vec<MonthlyObservation>> {
    let file: CuratedFile = serde_json::from_str(contents)
        .map_err(|e| DebtwatchError::Serialization(format!("Invalid curated dataset: {e}")))?;

    let mut records = Vec::with_capacity(file.data.len());
    for (index, entry) in file.data.into_iter().enumerate() {
        let record: MonthlyObservation = match serde_json::from_value(entry) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping undecodable curated record");
                continue;
            }
        };
        if let Err(e) = record.period() {
            tracing::warn!(index, error = %e, "Skipping curated record with invalid period");
            continue;
        }
        if !record.debt.is_finite() {
            tracing::warn!(index, "Skipping curated record with non-finite debt");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

#[async_trait]
impl CuratedSource for CuratedDataset {
    async fn load_curated_series(&self) -> Vec<MonthlyObservation> {
        match self.try_load().await {
            Ok(records) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = records.len(),
                    "Loaded curated dataset"
                );
                records
            }
            Err(DebtwatchError::Io(e)) => {
                tracing::info!(
                    path = %self.path.display(),
                    error = %e,
                    "Curated dataset not readable, contributing no data"
                );
                Vec::new()
            }
            Err(e) => {
                crate::log_source_unavailable!("curated", self.path.display(), &e);
                Vec::new()
            }
        }
    }
}
