use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the playground router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::landing))
        .route("/health", get(handlers::health))
        // Compiler endpoints
        .route("/compile", post(handlers::compiler::compile))
        .route("/normalize", post(handlers::compiler::normalize))
        .route("/emit", post(handlers::compiler::emit))
        // Registration
        .route("/register_license", post(handlers::license::register_license))
        // State and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
