pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::prompt_builder::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_request_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Prompt API
        .route(
            "/generate-prd-prompt",
            post(handlers::handle_generate_prd_prompt),
        )
        .route("/api/v1/prompts/build", post(handlers::handle_build_prompt))
        .route(
            "/api/v1/prompts/strategies",
            get(handlers::handle_list_strategies),
        )
        .layer(body_limit)
        .with_state(state)
}
