use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod rate_limit;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/config", post(handlers::update_config))
        .route("/config", get(handlers::get_config))
        .route("/scrape-and-email", get(handlers::scrape_and_email))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use fd_core::{Error, Headline, Result};
}
