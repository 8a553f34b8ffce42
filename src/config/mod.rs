//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CurrencyConfig, LogFormat, LoggingConfig, ResolverConfig, ServerConfig,
    StorageSettings,
};
