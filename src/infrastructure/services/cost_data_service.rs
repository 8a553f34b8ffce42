//! Cost data service - Tiered resolution of country and city records

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::cost_data::{
    CityData, CityKey, CityLookup, CityPatch, CitySummary, CountryCode, CountryData,
    CountryLookup, CountryPatch, CountrySummary, DEFAULT_COST_DATA_TTL_DAYS, Resolution,
    is_fresh, merge_city, merge_country,
};
use crate::domain::request_log::{RequestLog, RequestLogRepository};
use crate::domain::source::{SourceAttempt, SourceChain};
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_resolution, record_source_call};

const NO_DATA_FOUND: &str = "No data found";

/// Resolver settings
#[derive(Debug, Clone)]
pub struct CostDataServiceConfig {
    /// Age at which a cached record is refreshed
    pub cache_ttl: chrono::Duration,
}

impl Default for CostDataServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: chrono::Duration::days(DEFAULT_COST_DATA_TTL_DAYS),
        }
    }
}

/// Resolves country and city records through store, source chain and persist
pub struct CostDataService {
    countries: Arc<dyn Storage<CountryData>>,
    cities: Arc<dyn Storage<CityData>>,
    request_logs: Arc<dyn RequestLogRepository>,
    country_chain: SourceChain<CountryLookup, CountryPatch>,
    city_chain: SourceChain<CityLookup, CityPatch>,
    config: CostDataServiceConfig,
}

impl fmt::Debug for CostDataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostDataService")
            .field("country_chain", &self.country_chain)
            .field("city_chain", &self.city_chain)
            .field("config", &self.config)
            .finish()
    }
}

impl CostDataService {
    pub fn new(
        countries: Arc<dyn Storage<CountryData>>,
        cities: Arc<dyn Storage<CityData>>,
        request_logs: Arc<dyn RequestLogRepository>,
        country_chain: SourceChain<CountryLookup, CountryPatch>,
        city_chain: SourceChain<CityLookup, CityPatch>,
        config: CostDataServiceConfig,
    ) -> Self {
        Self {
            countries,
            cities,
            request_logs,
            country_chain,
            city_chain,
            config,
        }
    }

    /// Returns the country record, refreshing it when missing or expired.
    ///
    /// `None` means no source could supply the country and nothing was cached.
    pub async fn resolve_country(&self, code: &CountryCode) -> Option<Resolution<CountryData>> {
        let start = Instant::now();
        let result = self.resolve_country_uncounted(code).await;
        let elapsed = start.elapsed();

        let entry = RequestLog::country(code.clone());
        let entry = match &result {
            Ok(resolution) => {
                entry.succeeded(&resolution.value.data_source, elapsed.as_millis() as u64)
            }
            Err(message) => entry.failed(message, elapsed.as_millis() as u64),
        };
        self.append_log(entry).await;

        record_resolution("country", outcome_label(&result), elapsed);
        result.ok()
    }

    /// Returns the city record, resolving its country first when needed
    pub async fn resolve_city(&self, key: &CityKey) -> Option<Resolution<CityData>> {
        let start = Instant::now();
        let result = self.resolve_city_uncounted(key).await;
        let elapsed = start.elapsed();

        let entry = RequestLog::city(key.country_code().clone(), key.name());
        let entry = match &result {
            Ok(resolution) => {
                entry.succeeded(&resolution.value.data_source, elapsed.as_millis() as u64)
            }
            Err(message) => entry.failed(message, elapsed.as_millis() as u64),
        };
        self.append_log(entry).await;

        record_resolution("city", outcome_label(&result), elapsed);
        result.ok()
    }

    /// Cached countries ordered by name; never triggers a refresh
    pub async fn list_cached_countries(&self) -> Result<Vec<CountrySummary>, DomainError> {
        let mut countries: Vec<CountrySummary> = self
            .countries
            .list()
            .await?
            .iter()
            .map(CountryData::summary)
            .collect();

        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    /// Cached cities of one country, most populous first and unknown population last
    pub async fn list_cached_cities(
        &self,
        code: &CountryCode,
    ) -> Result<Vec<CitySummary>, DomainError> {
        let mut cities: Vec<CitySummary> = self
            .cities
            .list_by_key_prefix(&CityKey::country_prefix(code))
            .await?
            .iter()
            .map(CityData::summary)
            .collect();

        cities.sort_by(|a, b| {
            b.population
                .cmp(&a.population)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(cities)
    }

    /// Verifies the store answers
    pub async fn check_store(&self) -> Result<usize, DomainError> {
        self.countries.count().await
    }

    async fn resolve_country_uncounted(
        &self,
        code: &CountryCode,
    ) -> Result<Resolution<CountryData>, String> {
        let (cached, readable) = match self.countries.get(code).await {
            Ok(cached) => (cached, true),
            Err(e) => {
                warn!(country = %code, error = %e, "Failed to read cached country, treating as miss");
                (None, false)
            }
        };

        if let Some(country) = &cached {
            if is_fresh(country.last_fetched_at, Utc::now(), self.config.cache_ttl) {
                debug!(country = %code, "Cache hit");
                return Ok(Resolution::cache_hit(country.clone()));
            }
        }

        debug!(country = %code, cached = cached.is_some(), "Refreshing country from sources");

        let lookup = CountryLookup::new(code.clone(), cached.as_ref());
        let result = self
            .country_chain
            .resolve(&lookup, |_, patch| {
                merge_country(cached.as_ref(), code, patch, Utc::now())
            })
            .await;
        record_attempts(&result.attempts);

        match result.resolved {
            Some((country, source)) => {
                // Never overwrite a row that could not be read
                if !readable {
                    warn!(country = %code, "Skipping persist after failed cache read");
                } else if let Err(e) = self.countries.upsert(country.clone()).await {
                    warn!(country = %code, error = %e, "Failed to persist country");
                }

                info!(country = %code, source, quality = %country.data_quality, "Country refreshed");
                Ok(Resolution::refreshed(country, source))
            }
            None => match cached {
                Some(stale) => {
                    warn!(country = %code, "All sources failed, serving stale country");
                    Ok(Resolution::stale(stale))
                }
                None => Err(result.last_error().unwrap_or_else(|| NO_DATA_FOUND.to_string())),
            },
        }
    }

    async fn resolve_city_uncounted(&self, key: &CityKey) -> Result<Resolution<CityData>, String> {
        let code = key.country_code();

        if !self.owning_country_known(code).await {
            return Err(format!("Country '{}' not found", code));
        }

        let (cached, readable) = match self.cities.get(key).await {
            Ok(cached) => (cached, true),
            Err(e) => {
                warn!(city = %key, error = %e, "Failed to read cached city, treating as miss");
                (None, false)
            }
        };

        if let Some(city) = &cached {
            if is_fresh(city.last_fetched_at, Utc::now(), self.config.cache_ttl) {
                debug!(city = %key, "Cache hit");
                return Ok(Resolution::cache_hit(city.clone()));
            }
        }

        debug!(city = %key, cached = cached.is_some(), "Refreshing city from sources");

        let lookup = CityLookup { key: key.clone() };
        let result = self
            .city_chain
            .resolve(&lookup, |_, patch| {
                Some(merge_city(cached.as_ref(), key, patch, Utc::now()))
            })
            .await;
        record_attempts(&result.attempts);

        match result.resolved {
            Some((city, source)) => {
                if !readable {
                    warn!(city = %key, "Skipping persist after failed cache read");
                } else if let Err(e) = self.cities.upsert(city.clone()).await {
                    warn!(city = %key, error = %e, "Failed to persist city");
                }

                info!(city = %key, source, quality = %city.data_quality, "City refreshed");
                Ok(Resolution::refreshed(city, source))
            }
            None => match cached {
                Some(stale) => {
                    warn!(city = %key, "All sources failed, serving stale city");
                    Ok(Resolution::stale(stale))
                }
                None => Err(result.last_error().unwrap_or_else(|| NO_DATA_FOUND.to_string())),
            },
        }
    }

    /// A cached country of any age counts; otherwise the country is resolved
    async fn owning_country_known(&self, code: &CountryCode) -> bool {
        match self.countries.get(code).await {
            Ok(Some(_)) => return true,
            Ok(None) => {}
            Err(e) => warn!(country = %code, error = %e, "Failed to read owning country"),
        }

        self.resolve_country(code).await.is_some()
    }

    async fn append_log(&self, entry: RequestLog) {
        if let Err(e) = self.request_logs.append(entry).await {
            warn!(error = %e, "Failed to write request log");
        }
    }
}

fn outcome_label<T>(result: &Result<Resolution<T>, String>) -> &'static str {
    match result {
        Ok(resolution) => resolution.outcome.as_str(),
        Err(_) => "not_found",
    }
}

fn record_attempts(attempts: &[SourceAttempt]) {
    for attempt in attempts {
        record_source_call(
            attempt.source,
            attempt.outcome.as_str(),
            Duration::from_millis(attempt.latency_ms),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use chrono::{DateTime, Duration};

    use super::*;
    use crate::domain::DataSource;
    use crate::domain::cost_data::{CostMultipliers, DataQuality, ResolutionOutcome};
    use crate::domain::request_log::MockRequestLogRepository;
    use crate::domain::source::mock::StubSource;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::request_log::StorageRequestLogRepository;
    use crate::infrastructure::sources::{CityEstimator, CountryEstimator};
    use crate::infrastructure::storage::InMemoryStorage;

    type CountrySource = Arc<dyn DataSource<CountryLookup, CountryPatch>>;
    type CitySource = Arc<dyn DataSource<CityLookup, CityPatch>>;

    struct Fixture {
        countries: Arc<MockStorage<CountryData>>,
        cities: Arc<MockStorage<CityData>>,
        logs: Arc<InMemoryStorage<RequestLog>>,
        country_sources: Vec<CountrySource>,
        city_sources: Vec<CitySource>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                countries: Arc::new(MockStorage::new()),
                cities: Arc::new(MockStorage::new()),
                logs: Arc::new(InMemoryStorage::new()),
                country_sources: Vec::new(),
                city_sources: Vec::new(),
            }
        }

        fn with_countries(mut self, storage: MockStorage<CountryData>) -> Self {
            self.countries = Arc::new(storage);
            self
        }

        fn with_cities(mut self, storage: MockStorage<CityData>) -> Self {
            self.cities = Arc::new(storage);
            self
        }

        fn country_source(mut self, source: CountrySource) -> Self {
            self.country_sources.push(source);
            self
        }

        fn city_source(mut self, source: CitySource) -> Self {
            self.city_sources.push(source);
            self
        }

        fn service(&self) -> CostDataService {
            self.service_with_logs(Arc::new(StorageRequestLogRepository::new(self.logs.clone())))
        }

        fn service_with_logs(&self, logs: Arc<dyn RequestLogRepository>) -> CostDataService {
            CostDataService::new(
                self.countries.clone(),
                self.cities.clone(),
                logs,
                SourceChain::new(self.country_sources.clone(), StdDuration::from_millis(200)),
                SourceChain::new(self.city_sources.clone(), StdDuration::from_millis(200)),
                CostDataServiceConfig::default(),
            )
        }

        async fn log_entries(&self) -> Vec<RequestLog> {
            self.logs.list().await.unwrap()
        }
    }

    fn code(raw: &str) -> CountryCode {
        CountryCode::parse(raw).unwrap()
    }

    fn country_patch(name: &str, currency: &str) -> CountryPatch {
        let mut patch = CountryPatch::new("restcountries", DataQuality::Verified);
        patch.name = Some(name.to_string());
        patch.currency = Some(currency.to_string());
        patch.currency_symbol = Some("$".to_string());
        patch
    }

    fn cached_country(raw: &str, name: &str, fetched_at: DateTime<Utc>) -> CountryData {
        merge_country(None, &code(raw), country_patch(name, "USD"), fetched_at).unwrap()
    }

    fn stub_country(source: &Arc<StubSource<CountryPatch>>) -> CountrySource {
        source.clone()
    }

    fn stub_city(source: &Arc<StubSource<CityPatch>>) -> CitySource {
        source.clone()
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_is_cache_hit() {
        let live = Arc::new(StubSource::returning(
            "restcountries",
            country_patch("United States", "USD"),
        ));
        let fixture = Fixture::new().country_source(stub_country(&live));
        let service = fixture.service();

        let first = service.resolve_country(&code("US")).await.unwrap();
        let second = service.resolve_country(&code("US")).await.unwrap();

        assert_eq!(first.outcome, ResolutionOutcome::Refreshed { source: "restcountries" });
        assert_eq!(second.outcome, ResolutionOutcome::CacheHit);
        assert_eq!(
            serde_json::to_value(&first.value).unwrap(),
            serde_json::to_value(&second.value).unwrap()
        );
        assert_eq!(live.calls(), 1);
        assert_eq!(fixture.log_entries().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_lookup_falls_back_to_estimate() {
        let fixture = Fixture::new()
            .country_source(stub_country(&Arc::new(StubSource::failing(
                "restcountries",
                "HTTP 503",
            ))))
            .country_source(Arc::new(CountryEstimator::new()));

        let resolution = fixture.service().resolve_country(&code("DE")).await.unwrap();

        assert_eq!(resolution.value.name, "Germany");
        assert_eq!(resolution.value.data_source, "estimated");
        assert_eq!(resolution.value.data_quality, DataQuality::Estimated);
        assert_eq!(resolution.outcome, ResolutionOutcome::Refreshed { source: "estimated" });
    }

    #[tokio::test]
    async fn test_indonesia_estimate_when_live_sources_fail() {
        let fixture = Fixture::new()
            .country_source(stub_country(&Arc::new(StubSource::failing(
                "restcountries",
                "connection refused",
            ))))
            .country_source(stub_country(&Arc::new(StubSource::failing(
                "exchangerate-api",
                "connection refused",
            ))))
            .country_source(Arc::new(CountryEstimator::new()));

        let country = fixture
            .service()
            .resolve_country(&code("id"))
            .await
            .unwrap()
            .into_value();

        assert_eq!(country.name, "Indonesia");
        assert_eq!(country.currency, "IDR");
        assert_eq!(country.data_quality, DataQuality::Estimated);
        assert!(fixture.countries.get(&code("ID")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_country_is_not_found_and_logged() {
        let fixture = Fixture::new()
            .country_source(stub_country(&Arc::new(StubSource::empty("restcountries"))))
            .country_source(stub_country(&Arc::new(StubSource::failing(
                "exchangerate-api",
                "HTTP 500",
            ))))
            .country_source(Arc::new(CountryEstimator::new()));

        let resolution = fixture.service().resolve_country(&code("ZZ")).await;

        assert!(resolution.is_none());
        let entries = fixture.log_entries().await;
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].success);
        assert_eq!(
            entries[0].error_message.as_deref(),
            Some("Source error: exchangerate-api - HTTP 500")
        );
        assert_eq!(fixture.countries.write_attempts(), 0);
    }

    #[tokio::test]
    async fn test_expired_record_is_refreshed() {
        let old = Utc::now() - Duration::days(8);
        let live = Arc::new(StubSource::returning(
            "restcountries",
            country_patch("United States", "USD"),
        ));
        let fixture = Fixture::new()
            .with_countries(MockStorage::new().with_entity(cached_country("US", "USA", old)))
            .country_source(stub_country(&live));

        let resolution = fixture.service().resolve_country(&code("US")).await.unwrap();

        assert_eq!(live.calls(), 1);
        assert!(resolution.value.last_fetched_at > old);
        assert_eq!(resolution.value.name, "United States");
        let stored = fixture.countries.get(&code("US")).await.unwrap().unwrap();
        assert_eq!(stored.last_fetched_at, resolution.value.last_fetched_at);
    }

    #[tokio::test]
    async fn test_rate_only_patch_cannot_create_new_record() {
        let mut rates = CountryPatch::new("exchangerate-api", DataQuality::Verified);
        rates.exchange_rate_to_usd = Some(0.00006);
        let fixture = Fixture::new()
            .country_source(stub_country(&Arc::new(StubSource::returning(
                "exchangerate-api",
                rates,
            ))))
            .country_source(Arc::new(CountryEstimator::new()));

        let resolution = fixture.service().resolve_country(&code("ID")).await.unwrap();

        assert_eq!(resolution.value.data_source, "estimated");
    }

    #[tokio::test]
    async fn test_rate_only_patch_refreshes_existing_record() {
        let old = Utc::now() - Duration::days(30);
        let mut rates = CountryPatch::new("exchangerate-api", DataQuality::Verified);
        rates.exchange_rate_to_usd = Some(0.5);
        let fixture = Fixture::new()
            .with_countries(MockStorage::new().with_entity(cached_country("US", "USA", old)))
            .country_source(stub_country(&Arc::new(StubSource::returning(
                "exchangerate-api",
                rates,
            ))));

        let country = fixture
            .service()
            .resolve_country(&code("US"))
            .await
            .unwrap()
            .into_value();

        assert_eq!(country.name, "USA");
        assert_eq!(country.exchange_rate_to_usd, 0.5);
        assert_eq!(country.data_source, "exchangerate-api");
    }

    #[tokio::test]
    async fn test_stale_record_served_when_all_sources_fail() {
        let old = Utc::now() - Duration::days(10);
        let cached = cached_country("US", "United States", old);
        let fixture = Fixture::new()
            .with_countries(MockStorage::new().with_entity(cached.clone()))
            .country_source(stub_country(&Arc::new(StubSource::failing(
                "restcountries",
                "HTTP 502",
            ))));

        let resolution = fixture.service().resolve_country(&code("US")).await.unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::Stale);
        assert_eq!(resolution.value, cached);
        assert_eq!(fixture.countries.write_attempts(), 0);
        assert!(fixture.log_entries().await[0].success);
    }

    #[tokio::test]
    async fn test_upsert_failure_still_returns_data() {
        let fixture = Fixture::new()
            .with_countries(MockStorage::new().with_write_error("disk full"))
            .country_source(Arc::new(CountryEstimator::new()));

        let resolution = fixture.service().resolve_country(&code("US")).await.unwrap();

        assert_eq!(resolution.value.name, "United States");
        assert_eq!(fixture.countries.write_attempts(), 1);
    }

    #[tokio::test]
    async fn test_read_failure_treated_as_miss() {
        let live = Arc::new(StubSource::returning(
            "restcountries",
            country_patch("United States", "USD"),
        ));
        let fixture = Fixture::new()
            .with_countries(MockStorage::new().with_read_error("connection reset"))
            .country_source(stub_country(&live));

        let resolution = fixture.service().resolve_country(&code("US")).await;

        assert!(resolution.is_some());
        assert_eq!(live.calls(), 1);
        assert_eq!(fixture.countries.write_attempts(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_city_is_not_overwritten() {
        let fixture = Fixture::new()
            .with_countries(
                MockStorage::new().with_entity(cached_country("ID", "Indonesia", Utc::now())),
            )
            .with_cities(MockStorage::new().with_read_error("connection reset"))
            .city_source(Arc::new(CityEstimator::new()));

        let key = CityKey::new("Ubud", code("ID")).unwrap();
        let resolution = fixture.service().resolve_city(&key).await.unwrap();

        assert_eq!(resolution.value.data_quality, DataQuality::Estimated);
        assert_eq!(fixture.cities.write_attempts(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refreshes_leave_one_record() {
        let fixture = Fixture::new().country_source(Arc::new(CountryEstimator::new()));
        let service = Arc::new(fixture.service());

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..16 {
            let service = service.clone();
            tasks.spawn(async move { service.resolve_country(&code("ID")).await });
        }
        while let Some(joined) = tasks.join_next().await {
            assert_eq!(joined.unwrap().unwrap().value.name, "Indonesia");
        }

        assert_eq!(fixture.countries.count().await.unwrap(), 1);
        assert_eq!(fixture.log_entries().await.len(), 16);
    }

    #[tokio::test]
    async fn test_slow_source_is_cut_off() {
        let slow = Arc::new(StubSource::slow(
            "restcountries",
            country_patch("United States", "USD"),
            StdDuration::from_secs(5),
        ));
        let fixture = Fixture::new()
            .country_source(stub_country(&slow))
            .country_source(Arc::new(CountryEstimator::new()));

        let started = Instant::now();
        let resolution = fixture.service().resolve_country(&code("US")).await.unwrap();

        assert!(started.elapsed() < StdDuration::from_secs(2));
        assert_eq!(resolution.value.data_source, "estimated");
    }

    #[tokio::test]
    async fn test_every_call_writes_one_log_entry() {
        let mut logs = MockRequestLogRepository::new();
        logs.expect_append()
            .withf(|entry| entry.success && entry.data_source.as_deref() == Some("estimated"))
            .times(2)
            .returning(|_| Ok(()));

        let fixture = Fixture::new().country_source(Arc::new(CountryEstimator::new()));
        let service = fixture.service_with_logs(Arc::new(logs));

        service.resolve_country(&code("DE")).await.unwrap();
        service.resolve_country(&code("DE")).await.unwrap();
    }

    #[tokio::test]
    async fn test_log_failure_is_swallowed() {
        let mut logs = MockRequestLogRepository::new();
        logs.expect_append()
            .times(1)
            .returning(|_| Err(DomainError::storage("log table missing")));

        let fixture = Fixture::new().country_source(Arc::new(CountryEstimator::new()));
        let resolution = fixture
            .service_with_logs(Arc::new(logs))
            .resolve_country(&code("ID"))
            .await;

        assert!(resolution.is_some());
    }

    #[tokio::test]
    async fn test_city_resolves_missing_country_first() {
        let mut geo = CityPatch::new("open-meteo", DataQuality::Verified);
        geo.latitude = Some(35.1);
        geo.longitude = Some(129.04);
        geo.population = Some(3_678_555);

        let fixture = Fixture::new()
            .country_source(stub_country(&Arc::new(StubSource::returning(
                "restcountries",
                country_patch("South Korea", "KRW"),
            ))))
            .city_source(stub_city(&Arc::new(StubSource::returning("open-meteo", geo))))
            .city_source(Arc::new(CityEstimator::new()));

        let key = CityKey::new("Busan", code("KR")).unwrap();
        let city = fixture.service().resolve_city(&key).await.unwrap().into_value();

        assert_eq!(city.name(), "Busan");
        assert_eq!(city.population, Some(3_678_555));
        assert_eq!(city.multipliers, CostMultipliers::NEUTRAL);
        assert!(fixture.countries.get(&code("KR")).await.unwrap().is_some());
        assert!(fixture.cities.get(&key).await.unwrap().is_some());

        let entries = fixture.log_entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.iter().filter(|e| e.city_name.is_some()).count(), 1);
    }

    #[tokio::test]
    async fn test_city_not_found_when_country_fails() {
        let city_source = Arc::new(StubSource::returning(
            "estimated",
            CityPatch::new("estimated", DataQuality::Estimated),
        ));
        let fixture = Fixture::new()
            .country_source(stub_country(&Arc::new(StubSource::failing(
                "restcountries",
                "HTTP 500",
            ))))
            .city_source(stub_city(&city_source));

        let key = CityKey::new("Busan", code("KR")).unwrap();
        let city = fixture.service().resolve_city(&key).await;

        assert!(city.is_none());
        assert_eq!(city_source.calls(), 0);

        let entries = fixture.log_entries().await;
        let city_entry = entries.iter().find(|e| e.city_name.is_some()).unwrap();
        assert_eq!(city_entry.error_message.as_deref(), Some("Country 'KR' not found"));
    }

    #[tokio::test]
    async fn test_city_estimate_keeps_requested_name() {
        let fixture = Fixture::new()
            .with_countries(
                MockStorage::new().with_entity(cached_country("ID", "Indonesia", Utc::now())),
            )
            .city_source(stub_city(&Arc::new(StubSource::empty("open-meteo"))))
            .city_source(Arc::new(CityEstimator::new()));

        let key = CityKey::new("Canggu", code("ID")).unwrap();
        let resolution = fixture.service().resolve_city(&key).await.unwrap();

        assert_eq!(resolution.value.name(), "Canggu");
        assert_eq!(resolution.value.data_quality, DataQuality::Estimated);
        assert_eq!(resolution.outcome, ResolutionOutcome::Refreshed { source: "estimated" });
    }

    #[tokio::test]
    async fn test_fresh_city_is_cache_hit() {
        let key = CityKey::new("Ubud", code("ID")).unwrap();
        let cached = merge_city(
            None,
            &key,
            CityPatch::new("estimated", DataQuality::Estimated),
            Utc::now(),
        );
        let geo = Arc::new(StubSource::empty("open-meteo"));
        let fixture = Fixture::new()
            .with_countries(
                MockStorage::new().with_entity(cached_country("ID", "Indonesia", Utc::now())),
            )
            .with_cities(MockStorage::new().with_entity(cached))
            .city_source(stub_city(&geo));

        let resolution = fixture.service().resolve_city(&key).await.unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::CacheHit);
        assert_eq!(geo.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_cached_countries_sorted_by_name() {
        let now = Utc::now();
        let fixture = Fixture::new().with_countries(
            MockStorage::new()
                .with_entity(cached_country("US", "United States", now))
                .with_entity(cached_country("DE", "Germany", now))
                .with_entity(cached_country("ID", "Indonesia", now)),
        );

        let names: Vec<String> = fixture
            .service()
            .list_cached_countries()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Germany", "Indonesia", "United States"]);
    }

    #[tokio::test]
    async fn test_list_cached_countries_propagates_read_failure() {
        let fixture =
            Fixture::new().with_countries(MockStorage::new().with_read_error("connection reset"));

        let result = fixture.service().list_cached_countries().await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_list_cached_cities_by_population() {
        let now = Utc::now();
        let city = |name: &str, country: &str, population: Option<u64>| {
            let mut patch = CityPatch::new("open-meteo", DataQuality::Verified);
            patch.population = population;
            merge_city(None, &CityKey::new(name, code(country)).unwrap(), patch, now)
        };
        let fixture = Fixture::new().with_cities(
            MockStorage::new()
                .with_entity(city("Canggu", "ID", None))
                .with_entity(city("Jakarta", "ID", Some(10_562_088)))
                .with_entity(city("Denpasar", "ID", Some(725_314)))
                .with_entity(city("Busan", "KR", Some(3_678_555))),
        );

        let names: Vec<String> = fixture
            .service()
            .list_cached_cities(&code("ID"))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Jakarta", "Denpasar", "Canggu"]);
    }
}
