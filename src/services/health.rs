use crate::config::HealthConfig;
use crate::error::Error;
use anyhow::Result;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Reachability of a camera's stream endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Probe answered 200
    Online,
    /// Probe answered with any other status
    Unreachable,
    /// Connection failed or timed out
    Offline,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Online => write!(f, "online"),
            HealthStatus::Unreachable => write!(f, "unreachable"),
            HealthStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Probes `<stream_url><path>` with a fixed timeout. Cheap to clone.
#[derive(Clone)]
pub struct HealthChecker {
    client: reqwest::Client,
    path: String,
}

impl HealthChecker {
    pub fn new(config: &HealthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Probe(format!("Failed to build probe client: {}", e)))?;

        Ok(Self {
            client,
            path: config.path.clone(),
        })
    }

    pub fn probe_url(&self, stream_url: &str) -> String {
        format!("{}{}", stream_url, self.path)
    }

    pub async fn check(&self, stream_url: &str) -> HealthStatus {
        let url = self.probe_url(stream_url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => HealthStatus::Online,
            Ok(response) => {
                debug!("Probe {} answered {}", url, response.status());
                HealthStatus::Unreachable
            }
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                HealthStatus::Offline
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};
    use std::net::{SocketAddr, TcpListener};

    /// Serve `router` on an ephemeral port and return its base URL.
    fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service());
        tokio::spawn(server);
        format!("http://{}", addr)
    }

    fn unused_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }

    fn checker() -> HealthChecker {
        HealthChecker::new(&HealthConfig {
            timeout_secs: 1,
            ..HealthConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn probe_url_appends_health_path() {
        assert_eq!(
            checker().probe_url("http://10.0.0.5:8000"),
            "http://10.0.0.5:8000/api/health"
        );
    }

    #[tokio::test]
    async fn ok_response_is_online() {
        let base = spawn_stub(Router::new().route("/api/health", get(|| async { "ok" })));
        assert_eq!(checker().check(&base).await, HealthStatus::Online);
    }

    #[tokio::test]
    async fn error_response_is_unreachable() {
        let base = spawn_stub(Router::new().route(
            "/api/health",
            get(|| async { AxumStatus::SERVICE_UNAVAILABLE }),
        ));
        assert_eq!(checker().check(&base).await, HealthStatus::Unreachable);
    }

    #[tokio::test]
    async fn missing_route_is_unreachable() {
        let base = spawn_stub(Router::new());
        assert_eq!(checker().check(&base).await, HealthStatus::Unreachable);
    }

    #[tokio::test]
    async fn refused_connection_is_offline() {
        let base = format!("http://{}", unused_addr());
        assert_eq!(checker().check(&base).await, HealthStatus::Offline);
    }

    #[tokio::test]
    async fn invalid_url_is_offline() {
        assert_eq!(checker().check("not a url").await, HealthStatus::Offline);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(HealthStatus::Unreachable).unwrap(),
            "unreachable"
        );
        assert_eq!(HealthStatus::Offline.to_string(), "offline");
    }
}
