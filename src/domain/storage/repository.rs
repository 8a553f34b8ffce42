//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Keyed record store shared by the cost data caches and the request log
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a record by its natural key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all records, in no particular order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Records whose key starts with `prefix`, in no particular order
    async fn list_by_key_prefix(&self, prefix: &str) -> Result<Vec<E>, DomainError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|entity| entity.key().as_str().starts_with(prefix))
            .collect())
    }

    /// Inserts a new record, returns a conflict error if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Inserts or replaces the record stored under the entity's key.
    ///
    /// Backends must perform this as a single operation so that concurrent
    /// refreshes of one key never produce duplicate rows.
    async fn upsert(&self, entity: E) -> Result<E, DomainError>;

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
