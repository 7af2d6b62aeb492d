//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, EstimateRequest, EstimateResponse};
use crate::sizing::AssumptionTable;

/// Returns the assumption table in effect.
///
/// `GET /assumptions` → 200 + flat assumption JSON
pub async fn get_assumptions(State(state): State<Arc<AppState>>) -> Json<AssumptionTable> {
    Json(state.estimator.assumptions().clone())
}

/// Runs an estimate for the posted fleet and parameters.
///
/// `POST /estimate` → 200 + `EstimateResponse` JSON
/// zero station capacity → 422 + `ErrorResponse`
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.estimator.breakdown(&req.fleet, &req.parameters()) {
        Ok(breakdown) => Ok(Json(EstimateResponse::from(breakdown))),
        Err(err) => {
            log::warn!("Rejected estimate request: {err}");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        }
    }
}
