use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use comolive_core::{LiveConfig, RequestParams};

use super::tracing::tracing_middleware;
use crate::assets;
use crate::page::{DashboardOutcome, DashboardPage};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Gateway HTTP server.
pub struct GatewayServer {
    config: Arc<LiveConfig>,
    page: Arc<DashboardPage>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(page: DashboardPage) -> Self {
        let config = Arc::new(page.config().clone());
        Self {
            config,
            page: Arc::new(page),
        }
    }

    /// Build the Axum router.
    pub fn router(&self) -> Router {
        let timeout = Duration::from_secs(self.config.gateway.request_timeout_secs);

        Router::new()
            .route("/health", get(health_handler))
            .route("/", get(dashboard_handler))
            .route("/dashboard", get(dashboard_handler))
            .route("/dashboard.php", get(dashboard_handler))
            .route("/sysinfo", get(sysinfo_handler))
            .route("/sysinfo.php", get(sysinfo_handler))
            .route("/assets/styles.css", get(assets::styles_css))
            .with_state(self.page.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(tracing_middleware))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::REQUEST_TIMEOUT,
                        timeout,
                    )),
            )
    }

    /// Get the socket address to bind to.
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.config.gateway.host, self.config.gateway.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], self.config.gateway.port)))
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr();
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Gateway server listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

impl IntoResponse for DashboardOutcome {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardOutcome::AbortedMissingParam(_) => StatusCode::BAD_REQUEST,
            DashboardOutcome::Rendered(_) => StatusCode::OK,
        };
        (status, Html(self.into_html())).into_response()
    }
}

/// Health check handler.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn dashboard_handler(
    State(page): State<Arc<DashboardPage>>,
    RawQuery(raw): RawQuery,
) -> DashboardOutcome {
    let raw = raw.unwrap_or_default();
    let params = parse_params(&raw);
    let now = chrono::Utc::now().timestamp();
    page.render(&raw, &params, now).await
}

async fn sysinfo_handler(
    State(page): State<Arc<DashboardPage>>,
    RawQuery(raw): RawQuery,
) -> DashboardOutcome {
    let params = parse_params(raw.as_deref().unwrap_or_default());
    page.render_sysinfo(&params).await
}

fn parse_params(raw: &str) -> RequestParams {
    RequestParams::parse(raw).unwrap_or_else(|e| {
        tracing::warn!("Ignoring query string: {}", e);
        RequestParams::default()
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use comolive_core::config::StaticNode;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::StaticNodeCatalog;
    use crate::gateway::{REQUEST_ID_HEADER, TRACE_ID_HEADER};

    fn server() -> GatewayServer {
        let node = StaticNode {
            id: "host1:1234".to_string(),
            name: None,
            location: None,
            interface: None,
            comment: None,
            current_time: None,
            modules: BTreeMap::from([("ports".to_string(), "tcp or udp".to_string())]),
        };
        let page = DashboardPage::new(
            Arc::new(LiveConfig::default()),
            Arc::new(StaticNodeCatalog::new([node])),
        );
        GatewayServer::new(page)
    }

    async fn get(uri: &str) -> (StatusCode, String, Option<String>) {
        let response = server()
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap(), request_id)
    }

    #[test]
    fn test_addr_from_config() {
        assert_eq!(server().addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
    }

    #[test]
    fn test_health_response_serialization() {
        let resp = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body, request_id) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"healthy\""));
        assert!(request_id.is_some());
    }

    #[tokio::test]
    async fn test_trace_id_propagated() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(TRACE_ID_HEADER, "trace-abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(TRACE_ID_HEADER).unwrap(),
            "trace-abc"
        );
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_dashboard_forwards_raw_query() {
        let (status, body, _) =
            get("/dashboard.php?comonode=host1:1234&module=ports&stime=100&etime=200").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(
            "src=\"mainstage.php?comonode=host1:1234&module=ports&stime=100&etime=200\""
        ));
        assert_eq!(body.matches("<iframe").count(), 4);
    }

    #[tokio::test]
    async fn test_dashboard_without_node_is_bad_request() {
        let (status, body, _) = get("/dashboard?module=ports").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Thanks for playing!"));
        assert!(!body.contains("<iframe"));
    }

    #[tokio::test]
    async fn test_dashboard_unknown_node_still_renders() {
        let (status, body, _) = get("/dashboard?comonode=other:1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("frame-error"));
    }

    #[tokio::test]
    async fn test_sysinfo_endpoint() {
        let (status, body, _) = get("/sysinfo.php?comonode=host1:1234").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("tcp or udp"));
    }

    #[tokio::test]
    async fn test_stylesheet() {
        let (status, body, _) = get("/assets/styles.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(".rightcontent"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, _, _) = get("/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
