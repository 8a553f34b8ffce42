//! Public cost data, currency and planning endpoints

pub mod areas;
pub mod cities;
pub mod countries;
pub mod currency;
pub mod planning;

use axum::{
    Router,
    routing::{get, post},
};

use super::state::AppState;

/// Header telling clients how the record was obtained
pub const RESOLUTION_HEADER: &str = "x-data-resolution";

/// Create the `/api` router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/countries", get(countries::list_countries))
        .route("/countries/{code}", get(countries::get_country))
        .route("/countries/{code}/cities", get(cities::list_cities))
        .route("/cities/{country}/", get(cities::get_city_without_name))
        .route("/cities/{country}/{city}", get(cities::get_city))
        .route("/currency/{from}/{to}", get(currency::get_rate))
        .route("/plan", post(planning::create_plan))
        .route("/areas", get(areas::list_areas))
        .route("/areas/detect", get(areas::detect_area))
        .route("/areas/{slug}", get(areas::get_area))
}
