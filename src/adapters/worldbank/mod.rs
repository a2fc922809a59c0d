//! World Bank indicators API adapter

pub mod client;
pub mod models;

pub use client::WorldBankClient;
pub use models::{parse_indicator_payload, IndicatorPage, PageInfo};
