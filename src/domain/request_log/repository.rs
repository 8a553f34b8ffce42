//! Request log repository trait

use async_trait::async_trait;

use super::RequestLog;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Append-only sink for resolver request logs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequestLogRepository: Send + Sync {
    /// Appends an entry; entries are never updated or deleted
    async fn append(&self, entry: RequestLog) -> Result<(), DomainError>;
}
