/// How a resolver answered a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Cached record still inside the freshness window
    CacheHit,
    /// A source supplied new data which was merged and persisted
    Refreshed { source: &'static str },
    /// Every source failed; the expired cached record was served as is
    Stale,
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOutcome::CacheHit => "cache_hit",
            ResolutionOutcome::Refreshed { .. } => "refreshed",
            ResolutionOutcome::Stale => "stale",
        }
    }
}

/// A resolved value together with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub value: T,
    pub outcome: ResolutionOutcome,
}

impl<T> Resolution<T> {
    pub fn cache_hit(value: T) -> Self {
        Self {
            value,
            outcome: ResolutionOutcome::CacheHit,
        }
    }

    pub fn refreshed(value: T, source: &'static str) -> Self {
        Self {
            value,
            outcome: ResolutionOutcome::Refreshed { source },
        }
    }

    pub fn stale(value: T) -> Self {
        Self {
            value,
            outcome: ResolutionOutcome::Stale,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
