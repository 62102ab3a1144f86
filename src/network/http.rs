//! HTTP Surface
//!
//! Axum router and handlers exposing the reconciliation service:
//!
//! - `GET  /api/get_score/{user_id}` - reconcile and return state
//! - `POST /api/save_score`          - client-authoritative save
//!
//! Plus the static client bundle under `/static` with `index.html` at
//! `/`, when an asset directory is configured.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

use crate::network::protocol::{ErrorResponse, SaveRequest, SaveResponse, ScoreResponse};
use crate::player::UserId;
use crate::service::{EconomyService, ServiceError};
use crate::store::RecordStore;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,

    /// Directory of client assets served under `/static`, with its
    /// `index.html` at `/`. `None` disables the mount (API only).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".parse().unwrap(),
            static_dir: Some(PathBuf::from("static")),
        }
    }
}

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind or serve.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the application router over a reconciliation service.
pub fn build_router<S>(service: Arc<EconomyService<S>>, config: &ServerConfig) -> Router
where
    S: RecordStore + 'static,
{
    let mut router = Router::new()
        .route("/api/get_score/:user_id", get(get_score::<S>))
        .route("/api/save_score", post(save_score::<S>))
        .with_state(service);

    if let Some(dir) = &config.static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }

    router
}

/// Bind and serve until the process receives a shutdown signal.
pub async fn run<S>(
    service: Arc<EconomyService<S>>,
    config: ServerConfig,
) -> Result<(), ServerError>
where
    S: RecordStore + 'static,
{
    let router = build_router(service, &config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("economy server listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("shutdown signal received");
}

/// `GET /api/get_score/{user_id}`
async fn get_score<S: RecordStore>(
    State(service): State<Arc<EconomyService<S>>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<ScoreResponse>, (StatusCode, Json<ErrorResponse>)> {
    match service.get_state(user_id).await {
        Ok(view) => Ok(Json(ScoreResponse::from(view))),
        Err(e) => Err(service_error(user_id, e)),
    }
}

/// `POST /api/save_score`
async fn save_score<S: RecordStore>(
    State(service): State<Arc<EconomyService<S>>>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, (StatusCode, Json<ErrorResponse>)> {
    match service.save_state(request.user_id, request.snapshot()).await {
        Ok(()) => Ok(Json(SaveResponse::ok())),
        Err(e) => Err(service_error(request.user_id, e)),
    }
}

/// Map a service error to a status code and wire body.
fn service_error(user_id: UserId, e: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        ServiceError::UnknownUser(_) => {
            warn!(user_id, "save for unknown user rejected");
            StatusCode::NOT_FOUND
        }
        ServiceError::Storage(_) => {
            error!(user_id, "storage failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::model::EconomyConfig;
    use crate::store::memory::MemoryStore;
    use crate::MAX_ENERGY;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let service = Arc::new(EconomyService::new(
            MemoryStore::new(),
            EconomyConfig::default(),
        ));
        let config = ServerConfig {
            static_dir: None,
            ..ServerConfig::default()
        };
        build_router(service, &config)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_score_creates_new_user_with_defaults() {
        let router = test_router();

        let response = router.oneshot(get_request("/api/get_score/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ScoreResponse = json_body(response).await;
        assert_eq!(body.user_id, 42);
        assert_eq!(body.score, 0);
        assert_eq!(body.energy, MAX_ENERGY);
        assert_eq!(body.level, 1);
        assert_eq!(body.energy_per_second, 1);
    }

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let router = test_router();

        // First touch creates the record.
        let response = router
            .clone()
            .oneshot(get_request("/api/get_score/7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/save_score",
                serde_json::json!({"user_id": 7, "score": 500, "energy": 80, "level": 3}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let ack: SaveResponse = json_body(response).await;
        assert_eq!(ack.status, "ok");

        let response = router.oneshot(get_request("/api/get_score/7")).await.unwrap();
        let body: ScoreResponse = json_body(response).await;
        assert_eq!(body.score, 500);
        assert_eq!(body.energy, 80);
        assert_eq!(body.level, 3);
        assert_eq!(body.profit_per_hour, 200);
    }

    #[tokio::test]
    async fn test_score_only_save_preserves_energy_and_level() {
        let router = test_router();

        router
            .clone()
            .oneshot(get_request("/api/get_score/9"))
            .await
            .unwrap();

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/save_score",
                serde_json::json!({"user_id": 9, "score": 123}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(get_request("/api/get_score/9")).await.unwrap();
        let body: ScoreResponse = json_body(response).await;
        assert_eq!(body.score, 123);
        assert_eq!(body.energy, MAX_ENERGY);
        assert_eq!(body.level, 1);
    }

    #[tokio::test]
    async fn test_save_for_unknown_user_is_404() {
        let router = test_router();

        let response = router
            .oneshot(post_json(
                "/api/save_score",
                serde_json::json!({"user_id": 404, "score": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.status, "error");
    }

    #[tokio::test]
    async fn test_non_integer_user_id_is_client_error() {
        let router = test_router();

        let response = router.oneshot(get_request("/api/get_score/not-a-number")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
