//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{Storage, StorageEntity, StorageKey};

/// Thread-safe in-memory storage
///
/// Backs development runs and tests. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }
}

fn lock_error(kind: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire {} lock: {}", kind, e))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.values().cloned().collect())
    }

    async fn list_by_key_prefix(&self, prefix: &str) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, entity)| entity.clone())
            .collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(|e| lock_error("write", e))?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Record with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn upsert(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(|e| lock_error("write", e))?;

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.contains_key(key.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.len())
    }
}
