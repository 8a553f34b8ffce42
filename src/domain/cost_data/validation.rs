//! Validation of country codes, city names and currency codes

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Maximum length for city names
pub const MAX_CITY_NAME_LENGTH: usize = 100;

/// ISO 3166-1 alpha-2 shape, after upper-casing
static COUNTRY_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

/// ISO 4217 shape, after upper-casing
static CURRENCY_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum CostDataValidationError {
    InvalidCountryCode { code: String },
    EmptyCityName,
    CityNameTooLong { length: usize, max: usize },
    InvalidCityKey { key: String },
    InvalidCurrencyCode { code: String },
}

impl fmt::Display for CostDataValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCountryCode { code } => write!(
                f,
                "Invalid country code format '{}'. Use ISO 3166-1 alpha-2 (e.g., US, DE, ID)",
                code
            ),
            Self::EmptyCityName => write!(f, "City name cannot be empty"),
            Self::CityNameTooLong { length, max } => {
                write!(f, "City name too long: {} characters (max {})", length, max)
            }
            Self::InvalidCityKey { key } => write!(f, "Invalid city key '{}'", key),
            Self::InvalidCurrencyCode { code } => write!(
                f,
                "Invalid currency code format '{}'. Use ISO 4217 (e.g., USD, EUR, IDR)",
                code
            ),
        }
    }
}

impl std::error::Error for CostDataValidationError {}

impl From<CostDataValidationError> for DomainError {
    fn from(err: CostDataValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Upper-cases and validates a country code
pub fn normalize_country_code(raw: &str) -> Result<String, CostDataValidationError> {
    let code = raw.trim().to_ascii_uppercase();

    if !COUNTRY_CODE_PATTERN.is_match(&code) {
        return Err(CostDataValidationError::InvalidCountryCode {
            code: raw.to_string(),
        });
    }

    Ok(code)
}

/// Upper-cases and validates a currency code
pub fn normalize_currency_code(raw: &str) -> Result<String, CostDataValidationError> {
    let code = raw.trim().to_ascii_uppercase();

    if !CURRENCY_CODE_PATTERN.is_match(&code) {
        return Err(CostDataValidationError::InvalidCurrencyCode {
            code: raw.to_string(),
        });
    }

    Ok(code)
}

/// Trims and validates a city name
pub fn normalize_city_name(raw: &str) -> Result<String, CostDataValidationError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(CostDataValidationError::EmptyCityName);
    }

    let length = name.chars().count();
    if length > MAX_CITY_NAME_LENGTH {
        return Err(CostDataValidationError::CityNameTooLong {
            length,
            max: MAX_CITY_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}
