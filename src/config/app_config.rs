use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::observability::ObservabilityConfig;
use crate::infrastructure::sources::{
    DEFAULT_EXCHANGE_RATE_URL, DEFAULT_GEOCODING_URL, DEFAULT_REST_COUNTRIES_URL,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub resolver: ResolverConfig,
    pub currency: CurrencyConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Store backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Cost data resolver settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub cache_ttl_days: i64,
    pub source_timeout_secs: u64,
    pub rest_countries_url: String,
    pub exchange_rate_url: String,
    pub geocoding_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub cache_ttl_secs: u64,
    pub max_cached_pairs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl_days: 7,
            source_timeout_secs: 8,
            rest_countries_url: DEFAULT_REST_COUNTRIES_URL.to_string(),
            exchange_rate_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.cache_ttl_days)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 3600,
            max_cached_pairs: 1000,
        }
    }
}

impl CurrencyConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl AppConfig {
    /// Layers `config/default`, `config/local` and `APP__*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.resolver.cache_ttl(), chrono::Duration::days(7));
        assert_eq!(config.resolver.source_timeout(), Duration::from_secs(8));
        assert_eq!(config.currency.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [resolver]
                cache_ttl_days = 3

                [logging]
                format = "json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.resolver.cache_ttl_days, 3);
        assert_eq!(config.resolver.source_timeout_secs, 8);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
