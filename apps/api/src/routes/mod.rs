pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::synthesis::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/summary", post(handlers::handle_summary))
        .route("/api/v1/resumes/document", post(handlers::handle_document))
        .route("/api/v1/resumes/preview", post(handlers::handle_preview))
        .with_state(state)
}
