pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::alignment::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/experience/years",
            post(handlers::handle_total_years),
        )
        .route(
            "/api/v1/alignment/experience",
            post(handlers::handle_align_experience),
        )
        .fallback(not_found)
        .with_state(state)
}
