//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing)
//! - Bind the server to a listener and stop on shutdown
//! - Forward the raw query string upstream and relay the decoded snapshot

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ProxyConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::{shutdown, signals};
use crate::observability::metrics;
use crate::upstream::OneCallClient;

/// Application state injected into handlers.
///
/// Holds nothing mutable; the client's connection pool is shared.
#[derive(Clone)]
pub struct AppState {
    pub client: OneCallClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, rustls::Error> {
        let client = OneCallClient::new(&config.upstream)?;
        let router = Self::build_router(AppState { client });

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                            .on_response(DefaultOnResponse::new().level(Level::INFO)),
                    )
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Serve on `listener` until Ctrl+C, SIGTERM, or `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::shutdown_signal() => {},
                    _ = shutdown::triggered(shutdown_rx) => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
///
/// Method, path, headers and body of the inbound request are ignored; only
/// the raw query string is used. Failures are logged and answered with the
/// framework's default response (200, empty body, no content type).
async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    let url = state.client.url_for(query.as_deref().unwrap_or_default());
    tracing::info!(request_id = %request_id, url = %url, "Forwarding to upstream");

    let snapshot = match state.client.fetch(&url).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(request_id = %request_id, url = %url, error = %e, "Upstream call failed");
            metrics::record_request(method.as_str(), e.kind(), start_time);
            return unanswered();
        }
    };

    let body = match snapshot.encode() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Response encode failed");
            metrics::record_request(method.as_str(), metrics::OUTCOME_ENCODE_ERROR, start_time);
            return unanswered();
        }
    };

    tracing::info!(request_id = %request_id, hourly = snapshot.hourly.len(), "OK");
    metrics::record_request(method.as_str(), metrics::OUTCOME_OK, start_time);

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// What the caller sees when the handler gives up: nothing set explicitly.
fn unanswered() -> Response {
    Response::default()
}
