pub mod health;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::generation::handlers as generation;
use crate::portfolio::handlers as portfolio;
use crate::state::AppState;

/// Local development origins of the builder UI.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/ai/generate", post(generation::handle_generate))
        .route("/api/portfolio", post(portfolio::handle_save_portfolio))
        .route("/api/portfolio/:id", get(portfolio::handle_get_portfolio))
        .route("/api/portfolios", get(portfolio::handle_list_portfolios))
        .with_state(state)
}

/// CORS for the UI origins. Credentials are allowed, so methods and headers
/// mirror the preflight request instead of using a wildcard.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
