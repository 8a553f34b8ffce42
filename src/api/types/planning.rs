//! Request and response bodies for the plan and area routes

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::cost_data::{CityKey, CountryCode};
use crate::domain::planning::{AreaDetection, AreaProfile, FinancialPlan, PlanRequest};
use crate::infrastructure::services::PlanLocation;

/// City a plan is priced for
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCity {
    pub country_code: String,
    pub name: String,
}

/// `POST /api/plan`
///
/// At most one of `area` and `city` may be given; with neither the plan uses
/// the lifestyle baseline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePlanRequest {
    #[serde(flatten)]
    pub plan: PlanRequest,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub city: Option<PlanCity>,
}

impl CreatePlanRequest {
    pub fn location(&self) -> Result<PlanLocation, ApiError> {
        match (&self.area, &self.city) {
            (Some(_), Some(_)) => Err(ApiError::bad_request(
                "Specify either an area or a city, not both",
            )),
            (Some(area), None) => Ok(PlanLocation::Area(area.clone())),
            (None, Some(city)) => {
                let code = CountryCode::parse(&city.country_code)
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                let key =
                    CityKey::new(&city.name, code).map_err(|e| ApiError::bad_request(e.to_string()))?;
                Ok(PlanLocation::City(key))
            }
            (None, None) => Ok(PlanLocation::Anywhere),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub plan: FinancialPlan,
}

impl PlanResponse {
    pub fn new(plan: FinancialPlan) -> Self {
        Self {
            success: true,
            plan,
        }
    }
}

/// `GET /api/areas`
#[derive(Debug, Clone, Serialize)]
pub struct AreaListResponse {
    pub success: bool,
    pub areas: &'static [AreaProfile],
    pub count: usize,
}

impl AreaListResponse {
    pub fn new(areas: &'static [AreaProfile]) -> Self {
        Self {
            success: true,
            count: areas.len(),
            areas,
        }
    }
}

/// `GET /api/areas/{slug}` and `GET /api/areas/detect`
#[derive(Debug, Clone, Serialize)]
pub struct AreaResponse {
    pub success: bool,
    pub area: &'static AreaProfile,
    /// Only set by detection; false means the default area was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected: Option<bool>,
}

impl AreaResponse {
    pub fn new(area: &'static AreaProfile) -> Self {
        Self {
            success: true,
            area,
            detected: None,
        }
    }

    pub fn detection(detection: AreaDetection) -> Self {
        Self {
            detected: Some(detection.detected),
            ..Self::new(detection.area)
        }
    }
}

/// Query string of `GET /api/areas/detect`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AreaDetectQuery {
    pub lat: f64,
    pub lng: f64,
}

impl AreaDetectQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            return Err(ApiError::bad_request(format!(
                "Coordinates ({}, {}) are out of range",
                self.lat, self.lng
            )));
        }
        Ok(())
    }
}
