//! Source adapters - External providers and deterministic estimators

mod city_estimator;
mod country_estimator;
mod exchange_rate_api;
mod fallback_rates;
mod http_client;
mod open_meteo;
mod rest_countries;

pub use city_estimator::CityEstimator;
pub use country_estimator::{CountryEstimator, ESTIMATED_SOURCE};
pub use exchange_rate_api::{
    DEFAULT_EXCHANGE_RATE_URL, EXCHANGE_RATE_SOURCE, ExchangeRateApiClient,
    ExchangeRateCountrySource, ExchangeRateCurrencySource, RateTable,
};
pub use fallback_rates::{FallbackRateSource, STATIC_FALLBACK_SOURCE};
pub use http_client::HttpClient;
pub use open_meteo::{DEFAULT_GEOCODING_URL, OPEN_METEO_SOURCE, OpenMeteoGeocodingSource};
pub use rest_countries::{
    DEFAULT_REST_COUNTRIES_URL, REST_COUNTRIES_SOURCE, RestCountriesSource, RestCountry,
};
