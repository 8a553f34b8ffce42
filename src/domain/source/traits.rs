//! Data source trait

use async_trait::async_trait;

use crate::domain::DomainError;

/// An external or local origin of partial records.
///
/// `Ok(None)` means the source had nothing for the query; the chain moves on
/// without treating it as a failure.
#[async_trait]
pub trait DataSource<Q, P>: Send + Sync
where
    Q: Send + Sync,
    P: Send,
{
    /// Stable name used as `dataSource` and in logs
    fn name(&self) -> &'static str;

    async fn fetch(&self, query: &Q) -> Result<Option<P>, DomainError>;
}
