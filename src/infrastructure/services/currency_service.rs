//! Currency service - Exchange rates through memory, store and source tiers

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use tracing::{debug, info, warn};

use crate::domain::currency::{Conversion, CurrencyPair, ExchangeRateRecord, RateQuote};
use crate::domain::cost_data::is_fresh;
use crate::domain::source::SourceChain;
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_currency_lookup;

/// Currency cache settings
#[derive(Debug, Clone)]
pub struct CurrencyServiceConfig {
    /// Lifetime of a rate in memory and in the store
    pub cache_ttl: Duration,
    /// Upper bound of pairs kept in memory
    pub max_cached_pairs: u64,
}

impl Default for CurrencyServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            max_cached_pairs: 1000,
        }
    }
}

/// Answers exchange rates for currency pairs
pub struct CurrencyService {
    cache: Cache<CurrencyPair, RateQuote>,
    rates: Arc<dyn Storage<ExchangeRateRecord>>,
    chain: SourceChain<CurrencyPair, f64>,
    cache_ttl: chrono::Duration,
}

impl fmt::Debug for CurrencyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyService")
            .field("cached_pairs", &self.cache.entry_count())
            .field("chain", &self.chain)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl CurrencyService {
    pub fn new(
        rates: Arc<dyn Storage<ExchangeRateRecord>>,
        chain: SourceChain<CurrencyPair, f64>,
        config: CurrencyServiceConfig,
    ) -> Self {
        let cache = Cache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.max_cached_pairs)
            .build();

        Self {
            cache,
            rates,
            chain,
            cache_ttl: chrono::Duration::from_std(config.cache_ttl)
                .unwrap_or_else(|_| chrono::Duration::hours(1)),
        }
    }

    /// Rate for `pair`, or `NotFound` when no tier can answer
    pub async fn get_rate(&self, pair: &CurrencyPair) -> Result<RateQuote, DomainError> {
        if pair.is_identity() {
            record_currency_lookup("identity");
            return Ok(RateQuote::identity());
        }

        if let Some(quote) = self.cache.get(pair).await {
            debug!(pair = %pair, "Rate served from memory");
            record_currency_lookup("memory");
            return Ok(quote);
        }

        match self.rates.get(pair).await {
            Ok(Some(record)) if is_fresh(record.fetched_at, Utc::now(), self.cache_ttl) => {
                debug!(pair = %pair, "Rate served from store");
                record_currency_lookup("store");
                let quote = record.quote();
                self.cache.insert(pair.clone(), quote.clone()).await;
                return Ok(quote);
            }
            Ok(_) => {}
            Err(e) => warn!(pair = %pair, error = %e, "Failed to read stored rate"),
        }

        let result = self
            .chain
            .resolve(pair, |source, rate| {
                (rate.is_finite() && rate > 0.0).then(|| RateQuote::new(rate, source, Utc::now()))
            })
            .await;

        let Some((quote, source)) = result.resolved else {
            record_currency_lookup("miss");
            return Err(DomainError::not_found(format!(
                "No exchange rate available for {}",
                pair
            )));
        };

        info!(pair = %pair, source, rate = quote.rate, "Exchange rate refreshed");
        record_currency_lookup(source);

        self.cache.insert(pair.clone(), quote.clone()).await;
        if let Err(e) = self
            .rates
            .upsert(ExchangeRateRecord::new(pair.clone(), &quote))
            .await
        {
            warn!(pair = %pair, error = %e, "Failed to persist exchange rate");
        }

        Ok(quote)
    }

    /// Converts `amount` of the pair's base currency into its target
    pub async fn convert(&self, pair: &CurrencyPair, amount: f64) -> Result<Conversion, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(format!(
                "Amount must be a non-negative number, got {}",
                amount
            )));
        }

        let quote = self.get_rate(pair).await?;
        let rate = quote.rate;

        Conversion::new(pair.clone(), amount, quote).ok_or_else(|| {
            DomainError::validation(format!(
                "Amount {} is too large to convert at rate {}",
                amount, rate
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataSource;
    use crate::domain::source::mock::StubSource;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::sources::FallbackRateSource;

    type RateSource = Arc<dyn DataSource<CurrencyPair, f64>>;

    fn pair(from: &str, to: &str) -> CurrencyPair {
        CurrencyPair::parse(from, to).unwrap()
    }

    fn service(storage: Arc<MockStorage<ExchangeRateRecord>>, sources: Vec<RateSource>) -> CurrencyService {
        CurrencyService::new(
            storage,
            SourceChain::new(sources, Duration::from_millis(200)),
            CurrencyServiceConfig::default(),
        )
    }

    fn stub(source: &Arc<StubSource<f64>>) -> RateSource {
        source.clone()
    }

    #[tokio::test]
    async fn test_identity_pair_skips_sources() {
        let live = Arc::new(StubSource::returning("exchangerate-api", 2.0));
        let service = service(Arc::new(MockStorage::new()), vec![stub(&live)]);

        let quote = service.get_rate(&pair("usd", "USD")).await.unwrap();

        assert_eq!(quote.rate, 1.0);
        assert_eq!(quote.source, "identity");
        assert_eq!(live.calls(), 0);
    }

    #[tokio::test]
    async fn test_live_rate_is_cached_and_persisted() {
        let storage = Arc::new(MockStorage::new());
        let live = Arc::new(StubSource::returning("exchangerate-api", 0.92));
        let service = service(storage.clone(), vec![stub(&live)]);

        let first = service.get_rate(&pair("USD", "EUR")).await.unwrap();
        let second = service.get_rate(&pair("USD", "EUR")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.source, "exchangerate-api");
        assert_eq!(live.calls(), 1);
        assert_eq!(storage.write_attempts(), 1);
        assert!(storage.get(&pair("USD", "EUR")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_fresh_stored_rate_skips_sources() {
        let stored = ExchangeRateRecord::new(
            pair("EUR", "IDR"),
            &RateQuote::new(19000.0, "exchangerate-api", Utc::now()),
        );
        let live = Arc::new(StubSource::returning("exchangerate-api", 1.0));
        let service = service(
            Arc::new(MockStorage::new().with_entity(stored)),
            vec![stub(&live)],
        );

        let quote = service.get_rate(&pair("EUR", "IDR")).await.unwrap();

        assert_eq!(quote.rate, 19000.0);
        assert_eq!(live.calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_stored_rate_is_refreshed() {
        let stored = ExchangeRateRecord::new(
            pair("EUR", "IDR"),
            &RateQuote::new(
                19000.0,
                "exchangerate-api",
                Utc::now() - chrono::Duration::hours(2),
            ),
        );
        let live = Arc::new(StubSource::returning("exchangerate-api", 19300.0));
        let service = service(
            Arc::new(MockStorage::new().with_entity(stored)),
            vec![stub(&live)],
        );

        let quote = service.get_rate(&pair("EUR", "IDR")).await.unwrap();

        assert_eq!(quote.rate, 19300.0);
        assert_eq!(live.calls(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_reference_table() {
        let service = service(
            Arc::new(MockStorage::new()),
            vec![
                stub(&Arc::new(StubSource::failing("exchangerate-api", "HTTP 503"))),
                Arc::new(FallbackRateSource::new()),
            ],
        );

        let quote = service.get_rate(&pair("EUR", "IDR")).await.unwrap();

        assert_eq!(quote.rate, 19255.0);
        assert_eq!(quote.source, "static-fallback");
    }

    #[tokio::test]
    async fn test_non_positive_rate_is_rejected() {
        let service = service(
            Arc::new(MockStorage::new()),
            vec![
                stub(&Arc::new(StubSource::returning("exchangerate-api", 0.0))),
                Arc::new(FallbackRateSource::new()),
            ],
        );

        let quote = service.get_rate(&pair("USD", "GBP")).await.unwrap();
        assert_eq!(quote.source, "static-fallback");
    }

    #[tokio::test]
    async fn test_unknown_pair_is_not_found() {
        let service = service(
            Arc::new(MockStorage::new()),
            vec![
                stub(&Arc::new(StubSource::empty("exchangerate-api"))),
                Arc::new(FallbackRateSource::new()),
            ],
        );

        let result = service.get_rate(&pair("JPY", "KRW")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_store_failures_do_not_fail_lookup() {
        let storage = Arc::new(
            MockStorage::new()
                .with_read_error("connection reset")
                .with_write_error("connection reset"),
        );
        let service = service(storage, vec![Arc::new(FallbackRateSource::new())]);

        let quote = service.get_rate(&pair("USD", "IDR")).await.unwrap();
        assert_eq!(quote.rate, 18338.0);
    }

    #[tokio::test]
    async fn test_convert_multiplies_amount() {
        let service = service(
            Arc::new(MockStorage::new()),
            vec![Arc::new(FallbackRateSource::new())],
        );

        let conversion = service.convert(&pair("EUR", "USD"), 100.0).await.unwrap();

        assert!((conversion.converted - 105.0).abs() < 1e-9);
        assert_eq!(conversion.quote.source, "static-fallback");
    }

    #[tokio::test]
    async fn test_convert_rejects_invalid_amount() {
        let service = service(Arc::new(MockStorage::new()), Vec::new());

        for amount in [-1.0, f64::NAN, f64::INFINITY] {
            let result = service.convert(&pair("EUR", "USD"), amount).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_convert_rejects_overflowing_result() {
        let service = service(
            Arc::new(MockStorage::new()),
            vec![Arc::new(FallbackRateSource::new())],
        );

        let result = service.convert(&pair("EUR", "IDR"), 1e308).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
