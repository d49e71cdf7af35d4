use crate::config::ApiConfig;
use crate::db;
use crate::error::Error;
use crate::services::HealthChecker;
use anyhow::Result;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod alert_controller;
pub mod camera_controller;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<SqlitePool>,
    pub health_checker: HealthChecker,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error body returned by every route: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub message: String,
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST.as_u16(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(_) => ApiError::bad_request(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<Error>() {
            return (*err).clone().into();
        }

        ApiError::internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Implement IntoResponse for ApiError
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed: {}", self.message);
        }
        let body = Json(self);
        (status, body).into_response()
    }
}

/// `{"message": "..."}` confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Build the full router. Routes are mounted under `/api`.
pub fn create_router(state: AppState) -> Router {
    // Create a CORS layer that allows all origins and preflight requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/api/health", get(service_health))
        .merge(camera_controller::create_router())
        .merge(alert_controller::create_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub struct RestApi {
    config: ApiConfig,
    db_pool: Arc<SqlitePool>,
    health_checker: HealthChecker,
}

impl RestApi {
    pub fn new(
        config: &ApiConfig,
        db_pool: Arc<SqlitePool>,
        health_checker: HealthChecker,
    ) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            db_pool,
            health_checker,
        })
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let state = AppState {
            db_pool: Arc::clone(&self.db_pool),
            health_checker: self.health_checker.clone(),
        };
        let app = create_router(state);

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::Config(format!("Invalid API address {}: {}", addr, e)))?;

        let listener = TcpListener::bind(addr).await?;
        info!("API server listening on {}", addr);

        axum::Server::from_tcp(listener.into_std()?)?
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn service_health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    if db::ping(&state.db_pool).await {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": "unavailable" })),
        )
    }
}
