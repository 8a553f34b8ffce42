//! Source domain - Ordered chains of data sources

mod chain;
mod traits;

pub use chain::{AttemptOutcome, ChainResult, SourceAttempt, SourceChain};
pub use traits::DataSource;
