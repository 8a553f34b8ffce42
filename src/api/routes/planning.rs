//! Lifestyle plan handler

use axum::{Json, extract::State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CreatePlanRequest, JsonBody, PlanResponse};

/// POST /api/plan
pub async fn create_plan(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let location = request.location()?;
    debug!(location = ?location, lifestyle = %request.plan.lifestyle, "Creating plan");

    let plan = state
        .planning_service
        .create_plan(&request.plan, &location)
        .await?;

    Ok(Json(PlanResponse::new(plan)))
}
