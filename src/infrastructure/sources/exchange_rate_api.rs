//! ExchangeRate-API adapter - Live rate tables

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClient;
use super::rest_countries::RestCountriesSource;
use crate::domain::cost_data::{CountryLookup, CountryPatch, DataQuality};
use crate::domain::currency::CurrencyPair;
use crate::domain::{DataSource, DomainError};

pub const EXCHANGE_RATE_SOURCE: &str = "exchangerate-api";
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com";

/// Rates of every listed currency against one base
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Units of `code` per one base unit; missing or non-positive rates are ignored
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct ExchangeRateApiClient {
    http: HttpClient,
    base_url: String,
}

impl ExchangeRateApiClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn latest(&self, base: &str) -> Result<Option<RateTable>, DomainError> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        self.http.get_json(EXCHANGE_RATE_SOURCE, &url, &[]).await
    }
}

/// Country source filling in USD and EUR rates for the country's currency
#[derive(Debug, Clone)]
pub struct ExchangeRateCountrySource {
    client: ExchangeRateApiClient,
    countries: Arc<RestCountriesSource>,
}

impl ExchangeRateCountrySource {
    pub fn new(client: ExchangeRateApiClient, countries: Arc<RestCountriesSource>) -> Self {
        Self { client, countries }
    }

    async fn currency_for(&self, query: &CountryLookup) -> Result<Option<String>, DomainError> {
        if let Some(currency) = &query.known_currency {
            return Ok(Some(currency.clone()));
        }

        let country = self.countries.lookup(&query.code).await?;
        Ok(country.and_then(|c| c.primary_currency().map(|(code, _)| code.to_string())))
    }
}

#[async_trait]
impl DataSource<CountryLookup, CountryPatch> for ExchangeRateCountrySource {
    fn name(&self) -> &'static str {
        EXCHANGE_RATE_SOURCE
    }

    async fn fetch(&self, query: &CountryLookup) -> Result<Option<CountryPatch>, DomainError> {
        let Some(currency) = self.currency_for(query).await? else {
            return Ok(None);
        };
        let Some(table) = self.client.latest("USD").await? else {
            return Ok(None);
        };
        let (Some(per_usd), Some(eur_per_usd)) = (table.rate(&currency), table.rate("EUR")) else {
            return Ok(None);
        };

        let rate_to_usd = 1.0 / per_usd;

        let mut patch = CountryPatch::new(EXCHANGE_RATE_SOURCE, DataQuality::Verified);
        patch.exchange_rate_to_usd = Some(rate_to_usd);
        patch.exchange_rate_to_eur = Some(rate_to_usd * eur_per_usd);

        Ok(Some(patch))
    }
}

/// Currency source answering a pair from the base currency's table
#[derive(Debug, Clone)]
pub struct ExchangeRateCurrencySource {
    client: ExchangeRateApiClient,
}

impl ExchangeRateCurrencySource {
    pub fn new(client: ExchangeRateApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource<CurrencyPair, f64> for ExchangeRateCurrencySource {
    fn name(&self) -> &'static str {
        EXCHANGE_RATE_SOURCE
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<Option<f64>, DomainError> {
        let table = self.client.latest(pair.base().as_str()).await?;
        Ok(table.and_then(|t| t.rate(pair.target().as_str())))
    }
}
