// src/api/http/health.rs
//
// Health check endpoint for load balancers and container probes.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    codes_available: usize,
    codes_used: usize,
}

/// Health check endpoint reporting the live pool totals.
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = state.inventory.counts();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            codes_available: counts.available,
            codes_used: counts.used,
        }),
    )
}
