//! City cost data record and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::country::CountryCode;
use super::quality::DataQuality;
use super::validation::{CostDataValidationError, normalize_city_name};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Natural key of a city: the requested name within a country.
///
/// Rendered as `"{COUNTRY}:{name}"`; the country code never contains a
/// colon so the first one separates the two parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityKey {
    name: String,
    country_code: CountryCode,
    rendered: String,
}

impl CityKey {
    pub fn new(name: &str, country_code: CountryCode) -> Result<Self, CostDataValidationError> {
        let name = normalize_city_name(name)?;
        let rendered = format!("{}{}", Self::country_prefix(&country_code), name);

        Ok(Self {
            name,
            country_code,
            rendered,
        })
    }

    /// Rendered-key prefix shared by every city of `country_code`
    pub fn country_prefix(country_code: &CountryCode) -> String {
        format!("{}:", country_code)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }
}

impl StorageKey for CityKey {
    fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl TryFrom<String> for CityKey {
    type Error = CostDataValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (code, name) = value
            .split_once(':')
            .ok_or_else(|| CostDataValidationError::InvalidCityKey { key: value.clone() })?;

        Self::new(name, CountryCode::parse(code)?)
    }
}

impl From<CityKey> for String {
    fn from(key: CityKey) -> Self {
        key.rendered
    }
}

impl std::fmt::Display for CityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country_code)
    }
}

/// Relative cost of living in a city against its country average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostMultipliers {
    pub housing: f64,
    pub food: f64,
    pub transport: f64,
    pub utilities: f64,
    pub entertainment: f64,
}

impl CostMultipliers {
    pub const NEUTRAL: CostMultipliers = CostMultipliers {
        housing: 1.0,
        food: 1.0,
        transport: 1.0,
        utilities: 1.0,
        entertainment: 1.0,
    };
}

impl Default for CostMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Average local prices, in the country's currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePrices {
    pub rent_studio: Option<f64>,
    #[serde(rename = "rent1Bedroom")]
    pub rent_1_bedroom: Option<f64>,
    #[serde(rename = "rent3Bedroom")]
    pub rent_3_bedroom: Option<f64>,
    pub meal_inexpensive: Option<f64>,
    pub meal_mid_range: Option<f64>,
    pub transport_pass: Option<f64>,
    pub utilities: Option<f64>,
    pub internet: Option<f64>,
    pub gym_membership: Option<f64>,
}

impl AveragePrices {
    /// Overlays every price present in `other`
    pub fn overlay(&mut self, other: &AveragePrices) {
        fn pick(target: &mut Option<f64>, value: Option<f64>) {
            if value.is_some() {
                *target = value;
            }
        }

        pick(&mut self.rent_studio, other.rent_studio);
        pick(&mut self.rent_1_bedroom, other.rent_1_bedroom);
        pick(&mut self.rent_3_bedroom, other.rent_3_bedroom);
        pick(&mut self.meal_inexpensive, other.meal_inexpensive);
        pick(&mut self.meal_mid_range, other.meal_mid_range);
        pick(&mut self.transport_pass, other.transport_pass);
        pick(&mut self.utilities, other.utilities);
        pick(&mut self.internet, other.internet);
        pick(&mut self.gym_membership, other.gym_membership);
    }
}

/// Cached cost metadata for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityData {
    pub key: CityKey,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<u64>,
    pub multipliers: CostMultipliers,
    pub average_prices: AveragePrices,
    pub data_source: String,
    pub data_quality: DataQuality,
    pub last_fetched_at: DateTime<Utc>,
}

impl StorageEntity for CityData {
    type Key = CityKey;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}

impl CityData {
    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn country_code(&self) -> &CountryCode {
        self.key.country_code()
    }

    pub fn summary(&self) -> CitySummary {
        CitySummary {
            name: self.name().to_string(),
            population: self.population,
        }
    }
}

/// Partial city record produced by one source
#[derive(Debug, Clone, PartialEq)]
pub struct CityPatch {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<u64>,
    pub multipliers: Option<CostMultipliers>,
    pub average_prices: Option<AveragePrices>,
    pub data_source: String,
    pub data_quality: DataQuality,
}

impl CityPatch {
    pub fn new(data_source: impl Into<String>, data_quality: DataQuality) -> Self {
        Self {
            latitude: None,
            longitude: None,
            population: None,
            multipliers: None,
            average_prices: None,
            data_source: data_source.into(),
            data_quality,
        }
    }
}

/// What a city source is asked for
#[derive(Debug, Clone, PartialEq)]
pub struct CityLookup {
    pub key: CityKey,
}

/// Name and population of a cached city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySummary {
    pub name: String,
    pub population: Option<u64>,
}
