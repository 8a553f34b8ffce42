//! Country cost data record and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quality::DataQuality;
use super::validation::{CostDataValidationError, normalize_country_code};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Two-letter country code, always upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Normalizes and validates a raw code (`"id"` becomes `"ID"`)
    pub fn parse(raw: &str) -> Result<Self, CostDataValidationError> {
        normalize_country_code(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for CountryCode {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CostDataValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cached economic metadata for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryData {
    pub code: CountryCode,
    pub name: String,
    pub currency: String,
    pub currency_symbol: String,
    #[serde(rename = "exchangeRateToUSD")]
    pub exchange_rate_to_usd: f64,
    #[serde(rename = "exchangeRateToEUR")]
    pub exchange_rate_to_eur: f64,
    pub cost_of_living_index: Option<f64>,
    pub rent_index: Option<f64>,
    pub groceries_index: Option<f64>,
    pub restaurant_price_index: Option<f64>,
    pub local_purchasing_power: Option<f64>,
    pub average_salary: Option<f64>,
    pub data_source: String,
    pub data_quality: DataQuality,
    pub last_fetched_at: DateTime<Utc>,
}

impl StorageEntity for CountryData {
    type Key = CountryCode;

    fn key(&self) -> &Self::Key {
        &self.code
    }
}

impl CountryData {
    pub fn summary(&self) -> CountrySummary {
        CountrySummary {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

/// Partial country record produced by one source
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPatch {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub exchange_rate_to_usd: Option<f64>,
    pub exchange_rate_to_eur: Option<f64>,
    pub cost_of_living_index: Option<f64>,
    pub rent_index: Option<f64>,
    pub groceries_index: Option<f64>,
    pub restaurant_price_index: Option<f64>,
    pub local_purchasing_power: Option<f64>,
    pub average_salary: Option<f64>,
    pub data_source: String,
    pub data_quality: DataQuality,
}

impl CountryPatch {
    /// An empty patch tagged with its origin
    pub fn new(data_source: impl Into<String>, data_quality: DataQuality) -> Self {
        Self {
            name: None,
            currency: None,
            currency_symbol: None,
            exchange_rate_to_usd: None,
            exchange_rate_to_eur: None,
            cost_of_living_index: None,
            rent_index: None,
            groceries_index: None,
            restaurant_price_index: None,
            local_purchasing_power: None,
            average_salary: None,
            data_source: data_source.into(),
            data_quality,
        }
    }
}

/// What a country source is asked for
#[derive(Debug, Clone, PartialEq)]
pub struct CountryLookup {
    pub code: CountryCode,
    /// Currency already known from a cached record, if any
    pub known_currency: Option<String>,
}

impl CountryLookup {
    pub fn new(code: CountryCode, cached: Option<&CountryData>) -> Self {
        Self {
            code,
            known_currency: cached.map(|c| c.currency.clone()),
        }
    }
}

/// Code and name of a cached country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub code: CountryCode,
    pub name: String,
}
