//! Domain layer - Core business logic and entities

pub mod cost_data;
pub mod currency;
pub mod error;
pub mod planning;
pub mod request_log;
pub mod source;
pub mod storage;

pub use cost_data::{
    CityData, CityKey, CityLookup, CityPatch, CitySummary, CountryCode, CountryData,
    CountryLookup, CountryPatch, CountrySummary, DataQuality, Resolution, ResolutionOutcome,
};
pub use currency::{Conversion, CurrencyCode, CurrencyPair, ExchangeRateRecord, RateQuote};
pub use error::DomainError;
pub use request_log::{EndpointKind, RequestLog, RequestLogId, RequestLogRepository};
pub use source::{DataSource, SourceChain};
pub use storage::{Storage, StorageEntity, StorageKey};
