//! Country endpoint handlers

use axum::{Json, extract::State, http::HeaderValue, response::IntoResponse};
use tracing::debug;

use super::RESOLUTION_HEADER;
use crate::api::state::AppState;
use crate::api::types::{ApiError, CountryListResponse, CountryResponse, Path};
use crate::domain::cost_data::CountryCode;

/// GET /api/countries
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<CountryListResponse>, ApiError> {
    let countries = state.cost_data_service.list_cached_countries().await?;

    Ok(Json(CountryListResponse::new(countries)))
}

/// GET /api/countries/{code}
pub async fn get_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let code = CountryCode::parse(&code).map_err(|e| ApiError::bad_request(e.to_string()))?;
    debug!(country = %code, "Resolving country");

    let resolution = state
        .cost_data_service
        .resolve_country(&code)
        .await
        .ok_or_else(|| ApiError::not_found(format!("Country '{}' not found", code)))?;

    Ok((
        [(
            RESOLUTION_HEADER,
            HeaderValue::from_static(resolution.outcome.as_str()),
        )],
        Json(CountryResponse::new(resolution.value)),
    ))
}
