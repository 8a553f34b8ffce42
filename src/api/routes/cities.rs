//! City endpoint handlers

use axum::{Json, extract::State, http::HeaderValue, response::IntoResponse};
use tracing::debug;

use super::RESOLUTION_HEADER;
use crate::api::state::AppState;
use crate::api::types::{ApiError, CityListResponse, CityResponse, Path};
use crate::domain::cost_data::{CityKey, CostDataValidationError, CountryCode};

/// GET /api/countries/{code}/cities
pub async fn list_cities(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CityListResponse>, ApiError> {
    let code = CountryCode::parse(&code).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let cities = state.cost_data_service.list_cached_cities(&code).await?;

    Ok(Json(CityListResponse::new(cities)))
}

/// GET /api/cities/{country}/{city}
///
/// The city segment arrives percent-decoded, so `Ho%20Chi%20Minh` is looked
/// up as `Ho Chi Minh`.
pub async fn get_city(
    State(state): State<AppState>,
    Path((country, city)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let code = CountryCode::parse(&country).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let key = CityKey::new(&city, code).map_err(|e| ApiError::bad_request(e.to_string()))?;
    debug!(city = %key, "Resolving city");

    let resolution = state
        .cost_data_service
        .resolve_city(&key)
        .await
        .ok_or_else(|| ApiError::not_found(format!("City '{}' not found", key)))?;

    Ok((
        [(
            RESOLUTION_HEADER,
            HeaderValue::from_static(resolution.outcome.as_str()),
        )],
        Json(CityResponse::new(resolution.value)),
    ))
}

/// GET /api/cities/{country}/ with an empty city segment
pub async fn get_city_without_name(Path(country): Path<String>) -> ApiError {
    match CountryCode::parse(&country) {
        Ok(_) => ApiError::bad_request(CostDataValidationError::EmptyCityName.to_string()),
        Err(e) => ApiError::bad_request(e.to_string()),
    }
}
