//! REST Countries adapter - Country names and currencies

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClient;
use crate::domain::cost_data::{CountryCode, CountryLookup, CountryPatch, DataQuality};
use crate::domain::{DataSource, DomainError};

pub const REST_COUNTRIES_SOURCE: &str = "restcountries";
pub const DEFAULT_REST_COUNTRIES_URL: &str = "https://restcountries.com";

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, Deserialize)]
pub struct RestCountry {
    pub name: RestCountryName,
    pub cca2: String,
    #[serde(default)]
    pub currencies: BTreeMap<String, RestCurrency>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestCountryName {
    pub common: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestCurrency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

impl RestCountry {
    /// First listed currency code and its details
    pub fn primary_currency(&self) -> Option<(&str, &RestCurrency)> {
        self.currencies
            .iter()
            .next()
            .map(|(code, currency)| (code.as_str(), currency))
    }
}

/// Looks countries up by ISO code on the REST Countries v3.1 API
#[derive(Debug, Clone)]
pub struct RestCountriesSource {
    http: HttpClient,
    base_url: String,
}

impl RestCountriesSource {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn lookup(&self, code: &CountryCode) -> Result<Option<RestCountry>, DomainError> {
        let url = format!("{}/v3.1/alpha/{}", self.base_url, code);
        let countries: Option<Vec<RestCountry>> = self
            .http
            .get_json(
                REST_COUNTRIES_SOURCE,
                &url,
                &[("fields", "name,cca2,currencies")],
            )
            .await?;

        Ok(countries.and_then(|c| c.into_iter().next()))
    }
}

#[async_trait]
impl DataSource<CountryLookup, CountryPatch> for RestCountriesSource {
    fn name(&self) -> &'static str {
        REST_COUNTRIES_SOURCE
    }

    async fn fetch(&self, query: &CountryLookup) -> Result<Option<CountryPatch>, DomainError> {
        let Some(country) = self.lookup(&query.code).await? else {
            return Ok(None);
        };

        let (currency, symbol) = match country.primary_currency() {
            Some((code, details)) => (
                code.to_string(),
                details
                    .symbol
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
            ),
            None => (
                DEFAULT_CURRENCY.to_string(),
                DEFAULT_CURRENCY_SYMBOL.to_string(),
            ),
        };

        let mut patch = CountryPatch::new(REST_COUNTRIES_SOURCE, DataQuality::Verified);
        patch.name = Some(country.name.common);
        patch.currency = Some(currency);
        patch.currency_symbol = Some(symbol);

        Ok(Some(patch))
    }
}
