//! Request and response bodies for the currency route

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::currency::{Conversion, CurrencyPair, RateQuote};

/// Query string of `GET /api/currency/{from}/{to}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrencyQuery {
    pub amount: Option<f64>,
}

/// `GET /api/currency/{from}/{to}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyResponse {
    pub success: bool,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<f64>,
}

impl CurrencyResponse {
    pub fn rate(pair: &CurrencyPair, quote: RateQuote) -> Self {
        Self {
            success: true,
            from: pair.base().to_string(),
            to: pair.target().to_string(),
            rate: quote.rate,
            source: quote.source,
            timestamp: quote.fetched_at,
            amount: None,
            converted: None,
        }
    }

    pub fn conversion(conversion: Conversion) -> Self {
        Self {
            amount: Some(conversion.amount),
            converted: Some(conversion.converted),
            ..Self::rate(&conversion.pair, conversion.quote)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_response_omits_amount() {
        let pair = CurrencyPair::parse("EUR", "IDR").unwrap();
        let response = CurrencyResponse::rate(&pair, RateQuote::new(19255.0, "static-fallback", Utc::now()));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["from"], "EUR");
        assert_eq!(json["to"], "IDR");
        assert_eq!(json["source"], "static-fallback");
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn test_conversion_response() {
        let pair = CurrencyPair::parse("EUR", "USD").unwrap();
        let quote = RateQuote::new(1.05, "static-fallback", Utc::now());
        let conversion = Conversion::new(pair, 10.0, quote).unwrap();
        let json = serde_json::to_value(CurrencyResponse::conversion(conversion)).unwrap();

        assert_eq!(json["amount"], 10.0);
        assert_eq!(json["converted"], 10.5);
    }
}
