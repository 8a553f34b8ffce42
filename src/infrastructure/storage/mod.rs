//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use migrations::{
    CITIES_TABLE, COUNTRIES_TABLE, EXCHANGE_RATES_TABLE, Migration, PostgresMigrator,
    REQUEST_LOGS_TABLE, run_storage_migrations,
};
pub use postgres::{PostgresConfig, PostgresStorage};
