// src/api/http/mod.rs

pub mod events;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::state::AppState;

pub use events::slack_events;
pub use health::health_check;

/// Assemble the service router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/slack/events", post(slack_events))
        .route("/health", get(health_check))
        .with_state(state)
}
