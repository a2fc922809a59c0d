//! Fixed currency conversion
//!
//! The multipliers are configuration, not market data. They are approximate
//! and are never refreshed at runtime.

use serde::{Deserialize, Serialize};

/// Currency a snapshot can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    /// The configured local currency (`ExchangeRates::local_code`)
    Local,
}

/// Approximate, non-live conversion multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// 1 EUR in USD; used to convert curated EUR figures
    #[serde(default = "default_eur_to_usd")]
    pub eur_to_usd: f64,

    /// 1 USD in EUR
    #[serde(default = "default_usd_to_eur")]
    pub usd_to_eur: f64,

    /// 1 USD in the local currency
    #[serde(default = "default_usd_to_local")]
    pub usd_to_local: f64,

    /// 1 EUR in the local currency (BGN has a fixed peg)
    #[serde(default = "default_eur_to_local")]
    pub eur_to_local: f64,

    /// ISO code of the local currency
    #[serde(default = "default_local_code")]
    pub local_code: String,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            eur_to_usd: default_eur_to_usd(),
            usd_to_eur: default_usd_to_eur(),
            usd_to_local: default_usd_to_local(),
            eur_to_local: default_eur_to_local(),
            local_code: default_local_code(),
        }
    }
}

impl ExchangeRates {
    /// Resolve a currency code (case-insensitive)
    pub fn parse_currency(&self, code: &str) -> Option<Currency> {
        let code = code.trim().to_uppercase();
        match code.as_str() {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            _ if code == self.local_code.to_uppercase() => Some(Currency::Local),
            _ => None,
        }
    }

    /// ISO code for a currency
    pub fn code(&self, currency: Currency) -> String {
        match currency {
            Currency::Usd => "USD".to_string(),
            Currency::Eur => "EUR".to_string(),
            Currency::Local => self.local_code.to_uppercase(),
        }
    }

    /// Convert a USD amount into `target`
    pub fn from_usd(&self, amount: f64, target: Currency) -> f64 {
        match target {
            Currency::Usd => amount,
            Currency::Eur => amount * self.usd_to_eur,
            Currency::Local => amount * self.usd_to_local,
        }
    }

    /// Convert a EUR amount into `target`
    pub fn from_eur(&self, amount: f64, target: Currency) -> f64 {
        match target {
            Currency::Usd => amount * self.eur_to_usd,
            Currency::Eur => amount,
            Currency::Local => amount * self.eur_to_local,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let rates = [
            ("eur_to_usd", self.eur_to_usd),
            ("usd_to_eur", self.usd_to_eur),
            ("usd_to_local", self.usd_to_local),
            ("eur_to_local", self.eur_to_local),
        ];
        for (name, rate) in rates {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(format!("currency.{name} must be a positive number"));
            }
        }
        let code = self.local_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!(
                "currency.local_code must be a 3-letter ISO code, got '{}'",
                self.local_code
            ));
        }
        Ok(())
    }
}

fn default_eur_to_usd() -> f64 {
    1.08
}

fn default_usd_to_eur() -> f64 {
    0.92
}

fn default_usd_to_local() -> f64 {
    1.80
}

fn default_eur_to_local() -> f64 {
    1.95583
}

fn default_local_code() -> String {
    "BGN".to_string()
}
