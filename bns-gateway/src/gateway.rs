//! Gateway client implementation.
//!
//! Every gateway is fetched independently with its own timeout. A failing
//! gateway is reported in its [`GatewayOutcome`] and never affects the others.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use bns_core::constants::{
    DWEB_LINK_GATEWAY, GATEWAY_RECORD_PLACEHOLDER, GATEWAY_TIMEOUT_MS, HTML_PREVIEW_CHARS,
    IPFS_IO_GATEWAY,
};
use bns_core::error::{BnsError, Result};
use bns_core::traits::GatewayFetch;
use bns_core::types::{GatewayOutcome, GatewayResponse};

/// A named gateway URL template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayTemplate {
    /// Short name used in reports (e.g. "dweb.link")
    pub name: String,
    /// URL with a `{record}` placeholder
    pub url_template: String,
}

impl GatewayTemplate {
    /// Creates a template.
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Substitutes the record into the template.
    pub fn url_for(&self, record: &str) -> String {
        self.url_template.replace(GATEWAY_RECORD_PLACEHOLDER, record)
    }
}

/// Gateway client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateways fetched, in report order
    pub gateways: Vec<GatewayTemplate>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Characters kept in an HTML preview
    pub preview_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateways: vec![
                GatewayTemplate::new("ipfs.io", IPFS_IO_GATEWAY),
                GatewayTemplate::new("dweb.link", DWEB_LINK_GATEWAY),
            ],
            timeout_ms: GATEWAY_TIMEOUT_MS,
            preview_chars: HTML_PREVIEW_CHARS,
        }
    }
}

impl GatewayConfig {
    /// Creates a config probing only the given gateways.
    pub fn with_gateways(gateways: Vec<GatewayTemplate>) -> Self {
        Self {
            gateways,
            ..Default::default()
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

/// HTTP client that queries gateways for IPNS content.
pub struct GatewayClient {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

impl GatewayClient {
    /// Creates a client with the default gateways.
    pub fn new() -> Result<Self> {
        Self::with_config(GatewayConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: GatewayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| BnsError::InvalidInput(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    #[instrument(skip(self, gateway), fields(gateway = %gateway.name))]
    async fn fetch_one(
        &self,
        gateway: &GatewayTemplate,
        record: &str,
        with_preview: bool,
    ) -> GatewayOutcome {
        let url = gateway.url_for(record);
        info!(%url, "Attempting to resolve IPNS content");

        let result = self.fetch_url(gateway, &url, with_preview).await;
        match &result {
            Ok(response) => info!(
                status = response.status,
                content_type = response.content_type.as_deref().unwrap_or("unknown"),
                content_length = response.content_length,
                "Resolved IPNS content"
            ),
            Err(e) => warn!(error = %e, "Gateway resolution failed"),
        }

        GatewayOutcome {
            gateway: gateway.name.clone(),
            url,
            result: result.map_err(|e| e.to_string()),
        }
    }

    async fn fetch_url(
        &self,
        gateway: &GatewayTemplate,
        url: &str,
        with_preview: bool,
    ) -> Result<GatewayResponse> {
        let failure = |reason: String| BnsError::Gateway {
            gateway: gateway.name.clone(),
            reason,
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| failure(self.describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .bytes()
            .await
            .map_err(|e| failure(self.describe(&e)))?;

        let mut resolved = GatewayResponse {
            status: status.as_u16(),
            content_type,
            content_length: body.len(),
            preview: None,
        };

        if with_preview && resolved.is_html() {
            resolved.preview = Some(preview(&body, self.config.preview_chars));
        }

        debug!(bytes = body.len(), "Downloaded from gateway");
        Ok(resolved)
    }

    fn describe(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("timeout of {}ms exceeded", self.config.timeout_ms)
        } else {
            e.to_string()
        }
    }
}

#[async_trait]
impl GatewayFetch for GatewayClient {
    async fn fetch(&self, record: &str, with_preview: bool) -> Vec<GatewayOutcome> {
        join_all(
            self.config
                .gateways
                .iter()
                .map(|gateway| self.fetch_one(gateway, record, with_preview)),
        )
        .await
    }
}

/// First `chars` characters of the body followed by `...`.
fn preview(body: &[u8], chars: usize) -> String {
    let text = String::from_utf8_lossy(body);
    let head: String = text.chars().take(chars).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> GatewayClient {
        let config = GatewayConfig::with_gateways(vec![
            GatewayTemplate::new("primary", format!("{}/ipns/{{record}}", server.uri())),
            GatewayTemplate::new("secondary", format!("{}/alt/{{record}}/", server.uri())),
        ])
        .with_timeout(timeout);
        GatewayClient::with_config(config).unwrap()
    }

    #[test]
    fn test_default_templates() {
        let config = GatewayConfig::default();
        let urls: Vec<String> = config.gateways.iter().map(|g| g.url_for("k51abc")).collect();
        assert_eq!(
            urls,
            vec!["https://ipfs.io/ipns/k51abc", "https://k51abc.ipns.dweb.link/"]
        );
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        let body = "é".repeat(300);
        let text = preview(body.as_bytes(), 200);
        assert_eq!(text.chars().count(), 203);
        assert!(text.ends_with("..."));
        assert_eq!(preview(b"<p>hi</p>", 200), "<p>hi</p>...");
    }

    #[tokio::test]
    async fn test_successful_fetch_reports_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ipns/k51test"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{\"ok\":true}", "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/alt/k51test/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("hello", "text/plain"))
            .mount(&server)
            .await;

        let outcomes = client_for(&server, Duration::from_secs(5))
            .fetch("k51test", false)
            .await;

        assert_eq!(outcomes.len(), 2);
        let first = outcomes[0].result.as_ref().unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.content_type.as_deref(), Some("application/json"));
        assert_eq!(first.content_length, 11);
        assert!(first.preview.is_none());
        assert_eq!(outcomes[1].gateway, "secondary");
        assert!(outcomes[1].is_success());
    }

    #[tokio::test]
    async fn test_html_preview_only_when_requested() {
        let server = MockServer::start().await;
        let html = format!("<html>{}</html>", "x".repeat(500));
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(html.clone(), "text/html"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));

        let with_preview = client.fetch("k51html", true).await;
        let preview = with_preview[0].result.as_ref().unwrap().preview.clone().unwrap();
        assert_eq!(preview, format!("{}...", &html[..200]));

        let without = client.fetch("k51html", false).await;
        assert!(without[0].result.as_ref().unwrap().preview.is_none());
    }

    #[tokio::test]
    async fn test_failing_gateway_does_not_block_other() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ipns/k51test"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/alt/k51test/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<h1>ok</h1>", "text/html"))
            .mount(&server)
            .await;

        let outcomes = client_for(&server, Duration::from_secs(5))
            .fetch("k51test", true)
            .await;

        let err = outcomes[0].result.as_ref().unwrap_err();
        assert!(err.contains("primary"));
        assert!(err.contains("500"));
        assert!(outcomes[1].is_success());
    }

    #[tokio::test]
    async fn test_missing_content_is_a_failure() {
        // Nothing mounted: wiremock answers 404
        let server = MockServer::start().await;

        let outcomes = client_for(&server, Duration::from_secs(5))
            .fetch("k51none", false)
            .await;

        assert!(outcomes.iter().all(|o| !o.is_success()));
        assert!(outcomes[0].result.as_ref().unwrap_err().contains("404"));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ipns/k51slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/alt/k51slow/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("fast", "text/plain"))
            .mount(&server)
            .await;

        let outcomes = client_for(&server, Duration::from_millis(200))
            .fetch("k51slow", false)
            .await;

        assert!(outcomes[0].result.as_ref().unwrap_err().contains("timeout of 200ms exceeded"));
        assert!(outcomes[1].is_success());
    }
}
