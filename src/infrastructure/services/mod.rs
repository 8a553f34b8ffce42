//! Infrastructure services

mod cost_data_service;
mod currency_service;
mod planning_service;

pub use cost_data_service::{CostDataService, CostDataServiceConfig};
pub use currency_service::{CurrencyService, CurrencyServiceConfig};
pub use planning_service::{PlanLocation, PlanningService};
