//! Bali area handlers

use axum::Json;

use crate::api::types::{ApiError, AreaDetectQuery, AreaListResponse, AreaResponse, Path, Query};
use crate::domain::planning::AreaProfile;

/// GET /api/areas
pub async fn list_areas() -> Json<AreaListResponse> {
    Json(AreaListResponse::new(AreaProfile::all()))
}

/// GET /api/areas/{slug}
pub async fn get_area(Path(slug): Path<String>) -> Result<Json<AreaResponse>, ApiError> {
    AreaProfile::find(&slug)
        .map(|area| Json(AreaResponse::new(area)))
        .ok_or_else(|| ApiError::not_found(format!("Area '{}' not found", slug.trim())))
}

/// GET /api/areas/detect?lat=N&lng=N
pub async fn detect_area(
    Query(query): Query<AreaDetectQuery>,
) -> Result<Json<AreaResponse>, ApiError> {
    query.validate()?;

    Ok(Json(AreaResponse::detection(AreaProfile::detect(
        query.lat, query.lng,
    ))))
}
