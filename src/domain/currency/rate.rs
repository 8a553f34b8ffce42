//! Exchange rate records and quotes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pair::CurrencyPair;
use crate::domain::storage::StorageEntity;

/// Source tag for same-currency pairs
pub const IDENTITY_SOURCE: &str = "identity";

/// A rate answer together with its origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub rate: f64,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl RateQuote {
    pub fn new(rate: f64, source: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            rate,
            source: source.into(),
            fetched_at,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, IDENTITY_SOURCE, Utc::now())
    }
}

/// Persisted rate for one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateRecord {
    pub pair: CurrencyPair,
    pub rate: f64,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl StorageEntity for ExchangeRateRecord {
    type Key = CurrencyPair;

    fn key(&self) -> &Self::Key {
        &self.pair
    }
}

impl ExchangeRateRecord {
    pub fn new(pair: CurrencyPair, quote: &RateQuote) -> Self {
        Self {
            pair,
            rate: quote.rate,
            source: quote.source.clone(),
            fetched_at: quote.fetched_at,
        }
    }

    pub fn quote(&self) -> RateQuote {
        RateQuote::new(self.rate, self.source.clone(), self.fetched_at)
    }
}

/// Result of converting an amount between currencies
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub pair: CurrencyPair,
    pub amount: f64,
    pub converted: f64,
    pub quote: RateQuote,
}

impl Conversion {
    /// `None` when the converted amount is not a finite number
    pub fn new(pair: CurrencyPair, amount: f64, quote: RateQuote) -> Option<Self> {
        let converted = amount * quote.rate;

        converted.is_finite().then(|| Self {
            converted,
            pair,
            amount,
            quote,
        })
    }
}
