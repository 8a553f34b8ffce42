//! Storage-backed request log repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::request_log::{RequestLog, RequestLogRepository};
use crate::domain::storage::Storage;

/// Request log repository appending to a `Storage<RequestLog>`
#[derive(Debug)]
pub struct StorageRequestLogRepository {
    storage: Arc<dyn Storage<RequestLog>>,
}

impl StorageRequestLogRepository {
    pub fn new(storage: Arc<dyn Storage<RequestLog>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestLogRepository for StorageRequestLogRepository {
    async fn append(&self, entry: RequestLog) -> Result<(), DomainError> {
        self.storage.create(entry).await?;
        Ok(())
    }
}
