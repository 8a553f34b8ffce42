//! Currency endpoint handler

use axum::{Json, extract::State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CurrencyQuery, CurrencyResponse, Path, Query};
use crate::domain::currency::CurrencyPair;

/// GET /api/currency/{from}/{to}?amount=N
pub async fn get_rate(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<CurrencyResponse>, ApiError> {
    let pair = CurrencyPair::parse(&from, &to).map_err(|e| ApiError::bad_request(e.to_string()))?;
    debug!(pair = %pair, amount = ?query.amount, "Looking up exchange rate");

    let response = match query.amount {
        Some(amount) => {
            CurrencyResponse::conversion(state.currency_service.convert(&pair, amount).await?)
        }
        None => CurrencyResponse::rate(&pair, state.currency_service.get_rate(&pair).await?),
    };

    Ok(Json(response))
}
