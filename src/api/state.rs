//! Application state for shared services

use std::sync::Arc;

use crate::domain::cost_data::{
    CityData, CityKey, CitySummary, CountryCode, CountryData, CountrySummary, Resolution,
};
use crate::domain::currency::{Conversion, CurrencyPair, RateQuote};
use crate::domain::planning::{FinancialPlan, PlanRequest};
use crate::domain::DomainError;
use crate::infrastructure::services::{
    CostDataService, CurrencyService, PlanLocation, PlanningService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub cost_data_service: Arc<dyn CostDataServiceTrait>,
    pub currency_service: Arc<dyn CurrencyServiceTrait>,
    pub planning_service: Arc<dyn PlanningServiceTrait>,
}

impl AppState {
    pub fn new(
        cost_data_service: Arc<dyn CostDataServiceTrait>,
        currency_service: Arc<dyn CurrencyServiceTrait>,
        planning_service: Arc<dyn PlanningServiceTrait>,
    ) -> Self {
        Self {
            cost_data_service,
            currency_service,
            planning_service,
        }
    }
}

/// Trait for the tiered country and city resolver
#[async_trait::async_trait]
pub trait CostDataServiceTrait: Send + Sync {
    async fn resolve_country(&self, code: &CountryCode) -> Option<Resolution<CountryData>>;
    async fn resolve_city(&self, key: &CityKey) -> Option<Resolution<CityData>>;
    async fn list_cached_countries(&self) -> Result<Vec<CountrySummary>, DomainError>;
    async fn list_cached_cities(&self, code: &CountryCode)
    -> Result<Vec<CitySummary>, DomainError>;
    /// Verifies the backing store answers
    async fn check_store(&self) -> Result<(), DomainError>;
}

/// Trait for exchange rate lookups
#[async_trait::async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<RateQuote, DomainError>;
    async fn convert(&self, pair: &CurrencyPair, amount: f64) -> Result<Conversion, DomainError>;
}

/// Trait for lifestyle plan pricing
#[async_trait::async_trait]
pub trait PlanningServiceTrait: Send + Sync {
    async fn create_plan(
        &self,
        request: &PlanRequest,
        location: &PlanLocation,
    ) -> Result<FinancialPlan, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl CostDataServiceTrait for CostDataService {
    async fn resolve_country(&self, code: &CountryCode) -> Option<Resolution<CountryData>> {
        CostDataService::resolve_country(self, code).await
    }

    async fn resolve_city(&self, key: &CityKey) -> Option<Resolution<CityData>> {
        CostDataService::resolve_city(self, key).await
    }

    async fn list_cached_countries(&self) -> Result<Vec<CountrySummary>, DomainError> {
        CostDataService::list_cached_countries(self).await
    }

    async fn list_cached_cities(
        &self,
        code: &CountryCode,
    ) -> Result<Vec<CitySummary>, DomainError> {
        CostDataService::list_cached_cities(self, code).await
    }

    async fn check_store(&self) -> Result<(), DomainError> {
        CostDataService::check_store(self).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl CurrencyServiceTrait for CurrencyService {
    async fn get_rate(&self, pair: &CurrencyPair) -> Result<RateQuote, DomainError> {
        CurrencyService::get_rate(self, pair).await
    }

    async fn convert(&self, pair: &CurrencyPair, amount: f64) -> Result<Conversion, DomainError> {
        CurrencyService::convert(self, pair, amount).await
    }
}

#[async_trait::async_trait]
impl PlanningServiceTrait for PlanningService {
    async fn create_plan(
        &self,
        request: &PlanRequest,
        location: &PlanLocation,
    ) -> Result<FinancialPlan, DomainError> {
        PlanningService::create_plan(self, request, location).await
    }
}
