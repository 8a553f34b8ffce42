//! Deterministic city estimates

use async_trait::async_trait;

use super::country_estimator::ESTIMATED_SOURCE;
use crate::domain::cost_data::{CityLookup, CityPatch, CostMultipliers, DataQuality};
use crate::domain::{DataSource, DomainError};

/// Last resort city source: neutral multipliers for any city
#[derive(Debug, Clone, Default)]
pub struct CityEstimator;

impl CityEstimator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataSource<CityLookup, CityPatch> for CityEstimator {
    fn name(&self) -> &'static str {
        ESTIMATED_SOURCE
    }

    async fn fetch(&self, _query: &CityLookup) -> Result<Option<CityPatch>, DomainError> {
        let mut patch = CityPatch::new(ESTIMATED_SOURCE, DataQuality::Estimated);
        patch.multipliers = Some(CostMultipliers::NEUTRAL);
        Ok(Some(patch))
    }
}
