//! Request and response types of the HTTP boundary

pub mod cost_data;
pub mod currency;
pub mod error;
pub mod extract;
pub mod planning;

pub use cost_data::{CityDto, CityListResponse, CityResponse, CountryListResponse, CountryResponse};
pub use currency::{CurrencyQuery, CurrencyResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use extract::{JsonBody, Path, Query};
pub use planning::{
    AreaDetectQuery, AreaListResponse, AreaResponse, CreatePlanRequest, PlanCity, PlanResponse,
};
