//! One Call API client.

use axum::body::Body;
use axum::http::{Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::weather::WeatherSnapshot;

/// Failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Base URL plus raw query is not a valid request URI.
    #[error("invalid upstream URI: {0}")]
    InvalidUri(#[source] axum::http::uri::InvalidUri),

    /// Request could not be sent or no response head arrived.
    #[error("upstream request failed: {0}")]
    Transport(#[source] hyper_util::client::legacy::Error),

    /// Response body could not be read to the end.
    #[error("upstream body read failed: {0}")]
    Body(#[source] hyper::Error),

    /// The configured time limit elapsed before the body was read.
    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),

    /// Body is not a JSON document matching the snapshot schema.
    #[error("upstream body decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Decode(_) => "decode_error",
            _ => "transport_error",
        }
    }
}

/// Build the upstream URL: `<base>?<raw_query>`, byte for byte.
///
/// The raw query is not decoded, re-encoded or filtered. An empty query
/// still yields the trailing `?`.
pub fn upstream_url(base_url: &str, raw_query: &str) -> String {
    format!("{}?{}", base_url, raw_query)
}

/// Shared client for the One Call endpoint.
///
/// Cheap to clone; clones share one connection pool. Requests go out with
/// the URI exactly as built by [`upstream_url`]; nothing normalizes it.
#[derive(Clone)]
pub struct OneCallClient {
    http: Client<HttpsConnector<HttpConnector>, Body>,
    base_url: String,
    timeout: Option<Duration>,
}

impl OneCallClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, rustls::Error> {
        let mut connector = HttpConnector::new();
        connector.enforce_http(false);
        connector.set_connect_timeout(config.connect_timeout_secs.map(Duration::from_secs));

        let https = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .wrap_connector(connector);

        Ok(Self {
            http: Client::builder(TokioExecutor::new()).build(https),
            base_url: config.base_url.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL this client will call for the given raw query.
    pub fn url_for(&self, raw_query: &str) -> String {
        upstream_url(&self.base_url, raw_query)
    }

    /// GET `url` and decode the body.
    ///
    /// The upstream status code is not inspected; any body that decodes is
    /// accepted. The response is consumed or dropped on every return path,
    /// which hands the connection back to the pool or closes it. On timeout
    /// the in-flight exchange is dropped and its connection closed.
    pub async fn fetch(&self, url: &str) -> Result<WeatherSnapshot, UpstreamError> {
        let body = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(url))
                .await
                .map_err(|_| UpstreamError::Timeout(limit))??,
            None => self.exchange(url).await?,
        };

        WeatherSnapshot::decode(&body).map_err(UpstreamError::Decode)
    }

    /// Send the GET and read the whole body.
    async fn exchange(&self, url: &str) -> Result<axum::body::Bytes, UpstreamError> {
        let uri: Uri = url.parse().map_err(UpstreamError::InvalidUri)?;
        let mut request = Request::new(Body::empty());
        *request.uri_mut() = uri;

        let response = self
            .http
            .request(request)
            .await
            .map_err(UpstreamError::Transport)?;

        tracing::debug!(status = %response.status(), "Upstream responded");

        let collected = response
            .into_body()
            .collect()
            .await
            .map_err(UpstreamError::Body)?;
        Ok(collected.to_bytes())
    }
}
