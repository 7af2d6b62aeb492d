//! REST API over the station estimator.
//!
//! Provides two endpoints:
//! - `GET /assumptions` — the assumption table in effect
//! - `POST /estimate` — station estimate for a fleet and parameters

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::sizing::StationEstimator;

pub use types::{ErrorResponse, EstimateRequest, EstimateResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; no locks are needed since
/// the assumption table is never mutated.
pub struct AppState {
    /// Estimator bound to the scenario's assumption table.
    pub estimator: StationEstimator,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/assumptions", get(handlers::get_assumptions))
        .route("/estimate", post(handlers::post_estimate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
