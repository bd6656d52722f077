//! JSON HTTP surface over `CricketService`

mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::actions::CricketService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CricketService>,
}

/// Build the router with CORS and request tracing
pub fn router(service: Arc<CricketService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/matches/current", get(handlers::current_matches))
        .route("/api/matches/live", get(handlers::live_matches))
        .route("/api/matches/:id", get(handlers::match_details))
        .route("/api/matches/:id/scorecard", get(handlers::match_scorecard))
        .route("/api/series/featured", get(handlers::featured_series))
        .route("/api/system/status", get(handlers::system_status))
        .with_state(AppState { service })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
