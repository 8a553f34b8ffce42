//! Storage factory for runtime backend selection

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::domain::DomainError;
use crate::domain::storage::{Storage, StorageEntity};

use super::in_memory::InMemoryStorage;
use super::postgres::PostgresStorage;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Creates one storage per table on a shared backend
#[derive(Debug, Clone)]
pub enum StorageFactory {
    InMemory,
    Postgres(PgPool),
}

impl StorageFactory {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Backend over an already migrated pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::Postgres(pool)
    }

    /// Storage for `table_name`; in-memory backends ignore the table name
    pub fn create<E>(&self, table_name: &str) -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        match self {
            Self::InMemory => Arc::new(InMemoryStorage::<E>::new()),
            Self::Postgres(pool) => Arc::new(PostgresStorage::<E>::new(pool.clone(), table_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cost_data::CountryData;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("in-memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("Postgres".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert_eq!("pg".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert!(matches!(
            "sqlite".parse::<StorageType>(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_in_memory_factory_creates_independent_stores() {
        let factory = StorageFactory::in_memory();

        let first = factory.create::<CountryData>("countries");
        let second = factory.create::<CountryData>("countries");

        assert_eq!(first.count().await.unwrap(), 0);
        assert_eq!(second.count().await.unwrap(), 0);
    }
}
