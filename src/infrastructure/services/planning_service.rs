//! Planning service - Prices lifestyle plans for an area or a resolved city

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::{CostDataService, CurrencyService};
use crate::domain::DomainError;
use crate::domain::cost_data::CityKey;
use crate::domain::currency::CurrencyPair;
use crate::domain::planning::{
    AreaProfile, CategoryMultipliers, FinancialPlan, PlanRequest, calculate_plan,
};

/// Where a plan's cost multipliers come from
#[derive(Debug, Clone, PartialEq)]
pub enum PlanLocation {
    /// Lifestyle baseline without adjustment
    Anywhere,
    /// Slug of a built-in Bali area
    Area(String),
    /// City resolved through the cost data tiers
    City(CityKey),
}

pub struct PlanningService {
    cost_data: Arc<CostDataService>,
    currency: Arc<CurrencyService>,
    rate_pair: CurrencyPair,
}

impl fmt::Debug for PlanningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanningService")
            .field("rate_pair", &self.rate_pair.to_string())
            .finish_non_exhaustive()
    }
}

impl PlanningService {
    pub fn new(
        cost_data: Arc<CostDataService>,
        currency: Arc<CurrencyService>,
    ) -> Result<Self, DomainError> {
        let rate_pair = CurrencyPair::parse("EUR", "IDR")
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        Ok(Self {
            cost_data,
            currency,
            rate_pair,
        })
    }

    /// Prices `request` for `location` at the current EUR to IDR rate
    pub async fn create_plan(
        &self,
        request: &PlanRequest,
        location: &PlanLocation,
    ) -> Result<FinancialPlan, DomainError> {
        request.validate()?;

        let (label, multipliers) = self.location_multipliers(location).await?;
        let quote = self.currency.get_rate(&self.rate_pair).await?;
        debug!(rate = quote.rate, source = %quote.source, "Plan exchange rate");

        let plan = calculate_plan(request, label, multipliers, quote.rate)?;

        info!(
            plan_id = %plan.id,
            lifestyle = %plan.lifestyle,
            location = plan.location.as_deref().unwrap_or("anywhere"),
            total_cost_eur = plan.total_cost_eur,
            "Financial plan created"
        );

        Ok(plan)
    }

    async fn location_multipliers(
        &self,
        location: &PlanLocation,
    ) -> Result<(Option<String>, CategoryMultipliers), DomainError> {
        match location {
            PlanLocation::Anywhere => Ok((None, CategoryMultipliers::NEUTRAL)),
            PlanLocation::Area(slug) => {
                let area = AreaProfile::find(slug).ok_or_else(|| {
                    DomainError::validation(format!("Unknown area '{}'", slug.trim()))
                })?;
                Ok((Some(area.name.to_string()), area.multipliers))
            }
            PlanLocation::City(key) => {
                let resolution = self
                    .cost_data
                    .resolve_city(key)
                    .await
                    .ok_or_else(|| DomainError::not_found(format!("City '{}' not found", key)))?;
                Ok((
                    Some(key.to_string()),
                    resolution.value.multipliers.into(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::domain::DataSource;
    use crate::domain::cost_data::{
        CityData, CityPatch, CostMultipliers, CountryCode, CountryData, DataQuality, merge_city,
    };
    use crate::domain::currency::ExchangeRateRecord;
    use crate::domain::planning::BudgetCategory;
    use crate::domain::request_log::RequestLog;
    use crate::domain::source::SourceChain;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::request_log::StorageRequestLogRepository;
    use crate::infrastructure::services::{CostDataServiceConfig, CurrencyServiceConfig};
    use crate::infrastructure::sources::FallbackRateSource;
    use crate::infrastructure::storage::InMemoryStorage;

    fn ubud_key() -> CityKey {
        CityKey::new("Ubud", CountryCode::parse("ID").unwrap()).unwrap()
    }

    fn cached_city(multipliers: CostMultipliers) -> CityData {
        let mut patch = CityPatch::new("open-meteo", DataQuality::Verified);
        patch.multipliers = Some(multipliers);
        merge_city(None, &ubud_key(), patch, Utc::now())
    }

    fn service(cities: Vec<CityData>) -> PlanningService {
        let cost_data = CostDataService::new(
            Arc::new(InMemoryStorage::<CountryData>::new()),
            Arc::new(InMemoryStorage::with_entities(cities)),
            Arc::new(StorageRequestLogRepository::new(Arc::new(
                InMemoryStorage::<RequestLog>::new(),
            ))),
            SourceChain::new(Vec::new(), Duration::from_millis(200)),
            SourceChain::new(Vec::new(), Duration::from_millis(200)),
            CostDataServiceConfig::default(),
        );
        let rate_sources: Vec<Arc<dyn DataSource<CurrencyPair, f64>>> =
            vec![Arc::new(FallbackRateSource::new())];
        let currency = CurrencyService::new(
            Arc::new(MockStorage::<ExchangeRateRecord>::new()),
            SourceChain::new(rate_sources, Duration::from_millis(200)),
            CurrencyServiceConfig::default(),
        );

        PlanningService::new(Arc::new(cost_data), Arc::new(currency)).unwrap()
    }

    #[tokio::test]
    async fn test_plan_uses_reference_rate() {
        let plan = service(Vec::new())
            .create_plan(&PlanRequest::default(), &PlanLocation::Anywhere)
            .await
            .unwrap();

        assert_eq!(plan.exchange_rate, 19255.0);
        assert_eq!(plan.location, None);
        assert!((plan.total_monthly_idr - 1530.0 * 19255.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_area_multipliers_apply() {
        let plan = service(Vec::new())
            .create_plan(
                &PlanRequest::default(),
                &PlanLocation::Area("Seminyak".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(plan.location.as_deref(), Some("Seminyak"));
        assert_eq!(plan.multipliers.get(BudgetCategory::Housing), 1.8);
        assert!((plan.categories[0].monthly_eur - 700.0 * 1.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_area_is_validation_error() {
        let result = service(Vec::new())
            .create_plan(
                &PlanRequest::default(),
                &PlanLocation::Area("atlantis".to_string()),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_cached_city_multipliers_apply() {
        let multipliers = CostMultipliers {
            housing: 1.4,
            ..CostMultipliers::NEUTRAL
        };
        let plan = service(vec![cached_city(multipliers)])
            .create_plan(&PlanRequest::default(), &PlanLocation::City(ubud_key()))
            .await
            .unwrap();

        assert_eq!(plan.location.as_deref(), Some("Ubud, ID"));
        assert_eq!(plan.multipliers.housing, 1.4);
        assert_eq!(plan.multipliers.healthcare, 1.0);
    }

    #[tokio::test]
    async fn test_unresolvable_city_is_not_found() {
        let result = service(Vec::new())
            .create_plan(&PlanRequest::default(), &PlanLocation::City(ubud_key()))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_invalid_request_skips_city_resolution() {
        let request = PlanRequest {
            persons: 0,
            ..PlanRequest::default()
        };

        let result = service(Vec::new())
            .create_plan(&request, &PlanLocation::City(ubud_key()))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
