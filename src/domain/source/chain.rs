//! Source chain - Ordered fallback over data sources

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use super::traits::DataSource;

/// How a single source attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Returned a patch that was accepted
    Success,
    /// Returned nothing for the query
    Empty,
    /// Returned a patch the caller could not use
    Rejected,
    /// Returned an error
    Failed(String),
    /// Did not answer within the source timeout
    TimedOut,
}

impl AttemptOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::Empty => "empty",
            AttemptOutcome::Rejected => "rejected",
            AttemptOutcome::Failed(_) => "failed",
            AttemptOutcome::TimedOut => "timeout",
        }
    }
}

/// Result of asking one source
#[derive(Debug, Clone)]
pub struct SourceAttempt {
    pub source: &'static str,
    pub outcome: AttemptOutcome,
    pub latency_ms: u64,
}

/// Result of walking the chain
#[derive(Debug)]
pub struct ChainResult<R> {
    /// First accepted value and the source that produced it
    pub resolved: Option<(R, &'static str)>,
    /// Every source that was asked, in order
    pub attempts: Vec<SourceAttempt>,
}

impl<R> ChainResult<R> {
    /// Error message of the last failed attempt, if any
    pub fn last_error(&self) -> Option<String> {
        self.attempts.iter().rev().find_map(|a| match &a.outcome {
            AttemptOutcome::Failed(message) => Some(message.clone()),
            AttemptOutcome::TimedOut => Some(format!("{} timed out", a.source)),
            _ => None,
        })
    }
}

/// Asks sources in priority order until one yields an accepted patch
pub struct SourceChain<Q, P> {
    sources: Vec<Arc<dyn DataSource<Q, P>>>,
    source_timeout: Duration,
}

impl<Q, P> fmt::Debug for SourceChain<Q, P>
where
    Q: Send + Sync,
    P: Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceChain")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("source_timeout", &self.source_timeout)
            .finish()
    }
}

impl<Q, P> SourceChain<Q, P>
where
    Q: Send + Sync,
    P: Send,
{
    pub fn new(sources: Vec<Arc<dyn DataSource<Q, P>>>, source_timeout: Duration) -> Self {
        Self {
            sources,
            source_timeout,
        }
    }

    /// Walks the chain for `query`.
    ///
    /// `accept` turns a patch into the final value; returning `None` rejects
    /// the patch and the next source is tried. Sources after the first
    /// accepted one are never called.
    pub async fn resolve<R, F>(&self, query: &Q, mut accept: F) -> ChainResult<R>
    where
        F: FnMut(&'static str, P) -> Option<R>,
    {
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let name = source.name();
            let start = Instant::now();
            let result = timeout(self.source_timeout, source.fetch(query)).await;
            let latency_ms = start.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(Ok(Some(patch))) => match accept(name, patch) {
                    Some(value) => {
                        debug!(source = name, latency_ms, "Source supplied data");
                        attempts.push(SourceAttempt {
                            source: name,
                            outcome: AttemptOutcome::Success,
                            latency_ms,
                        });
                        return ChainResult {
                            resolved: Some((value, name)),
                            attempts,
                        };
                    }
                    None => {
                        debug!(source = name, "Source data rejected, trying next source");
                        AttemptOutcome::Rejected
                    }
                },
                Ok(Ok(None)) => {
                    debug!(source = name, "Source had no data");
                    AttemptOutcome::Empty
                }
                Ok(Err(e)) => {
                    warn!(source = name, error = %e, "Source failed");
                    AttemptOutcome::Failed(e.to_string())
                }
                Err(_) => {
                    warn!(
                        source = name,
                        timeout_ms = self.source_timeout.as_millis() as u64,
                        "Source timed out"
                    );
                    AttemptOutcome::TimedOut
                }
            };

            attempts.push(SourceAttempt {
                source: name,
                outcome,
                latency_ms,
            });
        }

        ChainResult {
            resolved: None,
            attempts,
        }
    }
}
