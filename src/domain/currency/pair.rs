//! Currency codes and pairs

use serde::{Deserialize, Serialize};

use crate::domain::cost_data::{CostDataValidationError, normalize_currency_code};
use crate::domain::storage::StorageKey;

/// Three-letter currency code, always upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Result<Self, CostDataValidationError> {
        normalize_currency_code(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CostDataValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered currency pair, keyed as `"FROM-TO"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    from: CurrencyCode,
    to: CurrencyCode,
    rendered: String,
}

impl CurrencyPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        let rendered = format!("{}-{}", from, to);
        Self { from, to, rendered }
    }

    pub fn parse(from: &str, to: &str) -> Result<Self, CostDataValidationError> {
        Ok(Self::new(CurrencyCode::parse(from)?, CurrencyCode::parse(to)?))
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.from
    }

    pub fn target(&self) -> &CurrencyCode {
        &self.to
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl StorageKey for CurrencyPair {
    fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CostDataValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once('-') {
            Some((from, to)) => Self::parse(from, to),
            None => Err(CostDataValidationError::InvalidCurrencyCode { code: value }),
        }
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.rendered
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parse_normalizes() {
        let pair = CurrencyPair::parse("eur", " idr ").unwrap();
        assert_eq!(pair.as_str(), "EUR-IDR");
        assert!(!pair.is_identity());
    }

    #[test]
    fn test_pair_rejects_bad_codes() {
        assert!(CurrencyPair::parse("EURO", "USD").is_err());
        assert!(CurrencyPair::parse("US", "EUR").is_err());
        assert!(CurrencyPair::try_from("EURUSD".to_string()).is_err());
    }

    #[test]
    fn test_pair_serde_as_string() {
        let pair = CurrencyPair::parse("USD", "GBP").unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"USD-GBP\"");
        assert_eq!(serde_json::from_str::<CurrencyPair>(&json).unwrap(), pair);
    }
}
