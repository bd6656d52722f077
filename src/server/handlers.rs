use std::future::Future;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::AppState;

/// Run an action on its own task so a panic becomes a 500 with a fixed body
async fn respond<T, F>(action: F, failure: &'static str) -> Response
where
    T: Serialize + Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    match tokio::spawn(action).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            error!("{}: {}", failure, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": failure })),
            )
                .into_response()
        }
    }
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn current_matches(State(state): State<AppState>) -> Response {
    let service = state.service;
    respond(
        async move { service.current_matches().await },
        "Failed to fetch matches",
    )
    .await
}

pub async fn live_matches(State(state): State<AppState>) -> Response {
    let service = state.service;
    respond(
        async move { service.live_matches().await },
        "Failed to fetch live matches",
    )
    .await
}

pub async fn match_details(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let service = state.service;
    respond(
        async move { service.match_details(&id).await },
        "Failed to fetch match details",
    )
    .await
}

pub async fn match_scorecard(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let service = state.service;
    respond(
        async move { service.match_scorecard(&id).await },
        "Failed to fetch scorecard",
    )
    .await
}

pub async fn featured_series(State(state): State<AppState>) -> Response {
    let service = state.service;
    respond(
        async move { service.featured_series().await },
        "Failed to fetch series",
    )
    .await
}

pub async fn system_status(State(state): State<AppState>) -> Response {
    let service = state.service;
    respond(
        async move { service.system_status().await },
        "Failed to fetch system status",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::actions::stub::StubProvider;
    use crate::actions::CricketService;
    use crate::api::SystemClock;
    use crate::mock_data;
    use crate::server::router;

    fn app() -> axum::Router {
        let service = CricketService::new(
            Arc::new(StubProvider::unconfigured()),
            Arc::new(SystemClock),
            Duration::from_secs(5),
        );
        router(Arc::new(service))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_current_matches_mock_envelope() {
        let (status, body) = get_json("/api/matches/current").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["usingMockData"], true);
        assert_eq!(body["live"].as_array().unwrap().len(), mock_data::live_matches().len());
        assert!(body["upcoming"].is_array());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_match_has_null_match() {
        let (status, body) = get_json("/api/matches/999").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["match"].is_null());
        assert_eq!(body["error"], "RAPIDAPI_KEY is not defined");
    }

    #[tokio::test]
    async fn test_sample_match_and_health() {
        let (_, body) = get_json("/api/matches/match-1").await;
        assert_eq!(body["match"]["team1"]["name"], "India");
        assert_eq!(body["usingMockData"], true);

        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_series_and_status_routes() {
        let (_, body) = get_json("/api/series/featured").await;
        assert_eq!(body["usingMockData"], true);
        assert_eq!(body["series"].as_array().unwrap().len(), 3);

        let (_, body) = get_json("/api/system/status").await;
        assert_eq!(body["provider"], "stub");
        assert_eq!(body["usage"]["limit"], 0);
    }

    #[tokio::test]
    async fn test_panicking_action_maps_to_500() {
        async fn explode() -> u32 {
            panic!("boom")
        }

        let response = respond(explode(), "Failed to fetch matches").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Failed to fetch matches" }));
    }
}
