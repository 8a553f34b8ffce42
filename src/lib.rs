//! Cost Data Service
//!
//! Country and city cost-of-living metadata behind a tiered resolver:
//! - Cached records served while younger than their TTL
//! - Ordered source chains (live providers, then deterministic estimates)
//! - Merge-and-upsert persistence with an append-only request log
//! - Exchange rates with memory, store and fallback tiers

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

use api::state::AppState;
use config::StorageSettings;
use domain::DataSource;
use domain::cost_data::{
    CityData, CityLookup, CityPatch, CountryData, CountryLookup, CountryPatch,
};
use domain::currency::{CurrencyPair, ExchangeRateRecord};
use domain::request_log::RequestLog;
use domain::source::SourceChain;
use infrastructure::request_log::StorageRequestLogRepository;
use infrastructure::services::{
    CostDataService, CostDataServiceConfig, CurrencyService, CurrencyServiceConfig,
    PlanningService,
};
use infrastructure::sources::{
    CityEstimator, CountryEstimator, ExchangeRateApiClient, ExchangeRateCountrySource,
    ExchangeRateCurrencySource, FallbackRateSource, HttpClient, OpenMeteoGeocodingSource,
    RestCountriesSource,
};
use infrastructure::storage::{
    CITIES_TABLE, COUNTRIES_TABLE, EXCHANGE_RATES_TABLE, PostgresConfig, REQUEST_LOGS_TABLE,
    StorageFactory, StorageType, run_storage_migrations,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration.
///
/// A PostgreSQL backend is connected and migrated before any service is
/// built.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = StorageType::from_str(&config.storage.backend)?;
    info!(backend = ?backend, "Storage backend selected");

    let factory = match backend {
        StorageType::InMemory => StorageFactory::in_memory(),
        StorageType::Postgres => {
            let pool = connect_postgres(&config.storage).await?;
            let applied = run_storage_migrations(&pool).await?;
            info!(applied, "Storage migrations complete");
            StorageFactory::postgres(pool)
        }
    };

    build_app_state(config, &factory)
}

/// Opens the PostgreSQL pool; `DATABASE_URL` is used when the config has no URL
pub async fn connect_postgres(settings: &StorageSettings) -> anyhow::Result<PgPool> {
    let url = match &settings.database_url {
        Some(url) => url.clone(),
        None => std::env::var("DATABASE_URL")
            .context("storage.database_url or DATABASE_URL is required for the postgres backend")?,
    };

    info!("Connecting to PostgreSQL...");
    let pool = PostgresConfig::new(url)
        .with_max_connections(settings.max_connections)
        .with_min_connections(settings.min_connections)
        .connect()
        .await?;
    info!("PostgreSQL connection established");

    Ok(pool)
}

/// Wires stores, source chains and services on top of `factory`
pub fn build_app_state(config: &AppConfig, factory: &StorageFactory) -> anyhow::Result<AppState> {
    let resolver = &config.resolver;
    let http = HttpClient::with_timeout(resolver.source_timeout())?;

    let rest_countries = Arc::new(RestCountriesSource::new(
        http.clone(),
        resolver.rest_countries_url.clone(),
    ));
    let exchange_rates = ExchangeRateApiClient::new(http.clone(), resolver.exchange_rate_url.clone());

    let country_sources: Vec<Arc<dyn DataSource<CountryLookup, CountryPatch>>> = vec![
        rest_countries.clone(),
        Arc::new(ExchangeRateCountrySource::new(
            exchange_rates.clone(),
            rest_countries,
        )),
        Arc::new(CountryEstimator::new()),
    ];
    let city_sources: Vec<Arc<dyn DataSource<CityLookup, CityPatch>>> = vec![
        Arc::new(OpenMeteoGeocodingSource::new(
            http,
            resolver.geocoding_url.clone(),
        )),
        Arc::new(CityEstimator::new()),
    ];
    let rate_sources: Vec<Arc<dyn DataSource<CurrencyPair, f64>>> = vec![
        Arc::new(ExchangeRateCurrencySource::new(exchange_rates)),
        Arc::new(FallbackRateSource::new()),
    ];

    let cost_data_service = Arc::new(CostDataService::new(
        factory.create::<CountryData>(COUNTRIES_TABLE),
        factory.create::<CityData>(CITIES_TABLE),
        Arc::new(StorageRequestLogRepository::new(
            factory.create::<RequestLog>(REQUEST_LOGS_TABLE),
        )),
        SourceChain::new(country_sources, resolver.source_timeout()),
        SourceChain::new(city_sources, resolver.source_timeout()),
        CostDataServiceConfig {
            cache_ttl: resolver.cache_ttl(),
        },
    ));

    let currency_service = Arc::new(CurrencyService::new(
        factory.create::<ExchangeRateRecord>(EXCHANGE_RATES_TABLE),
        SourceChain::new(rate_sources, resolver.source_timeout()),
        CurrencyServiceConfig {
            cache_ttl: config.currency.cache_ttl(),
            max_cached_pairs: config.currency.max_cached_pairs,
        },
    ));
    let planning_service =
        PlanningService::new(cost_data_service.clone(), currency_service.clone())?;

    info!(
        cache_ttl_days = resolver.cache_ttl_days,
        source_timeout_secs = resolver.source_timeout_secs,
        "Cost data service initialized"
    );

    Ok(AppState::new(
        cost_data_service,
        currency_service,
        Arc::new(planning_service),
    ))
}
