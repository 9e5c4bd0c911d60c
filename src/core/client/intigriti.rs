//! `reqwest`-backed implementation of [`ResearcherApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder, Url,
    header::{ACCEPT, RETRY_AFTER},
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ApiError, ApiRequest, ApiResult, ResearcherApi};
use crate::core::config::ApiConfig;

/// Base URL of the Intigriti Researcher API.
pub const DEFAULT_BASE_URL: &str = "https://api.intigriti.com/external/researcher";

/// Upper bound for a single API call, connect to last byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the researcher API token.
pub const TOKEN_ENV_VAR: &str = "INTIGRITI_API_TOKEN";

const USER_AGENT: &str = concat!("IntigritiMCPServer/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Intigriti Researcher API.
#[derive(Clone)]
pub struct IntigritiClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl IntigritiClient {
    /// Create a client from the API configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Self::http_builder(config)
            .build()
            .map_err(ApiError::transport)?;
        Self::from_parts(config, http)
    }

    /// The `reqwest` builder used by [`IntigritiClient::new`].
    pub fn http_builder(config: &ApiConfig) -> ClientBuilder {
        Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
    }

    /// Create a client around an already configured `reqwest::Client`.
    pub fn from_parts(config: &ApiConfig, http: Client) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone(),
        })
    }
}

impl std::fmt::Debug for IntigritiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntigritiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl ResearcherApi for IntigritiClient {
    #[instrument(skip_all, fields(path = %request.path()))]
    async fn get(&self, request: &ApiRequest) -> ApiResult<Value> {
        let url = request.url(&self.base_url)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Request to Intigriti API failed: {}", e);
                ApiError::transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();
            warn!("Intigriti API returned HTTP {}", status.as_u16());
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
                retry_after,
            });
        }

        let body = response.text().await.map_err(ApiError::transport)?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    fn http_response(status_line: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            extra_headers,
            body
        )
    }

    /// Serve `response` to every connection; forwards each raw request head.
    async fn stub_server(response: String) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (format!("http://{}", addr), rx)
    }

    /// Accept connections and never answer.
    async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let _held = stream;
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                });
            }
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: &str, timeout: Duration) -> IntigritiClient {
        let config = ApiConfig::new("test-token")
            .with_base_url(base_url)
            .with_timeout(timeout);
        let http = IntigritiClient::http_builder(&config)
            .no_proxy()
            .build()
            .unwrap();
        IntigritiClient::from_parts(&config, http).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_json_body_unchanged() {
        let (base, mut requests) =
            stub_server(http_response("200 OK", "", r#"{"id":"abc"}"#)).await;
        let client = client_for(&base, Duration::from_secs(5));

        let body = client
            .get(&ApiRequest::new(["v1", "programs", "abc"]))
            .await
            .unwrap();
        assert_eq!(body, json!({"id": "abc"}));

        let head = requests.recv().await.unwrap();
        assert!(head.starts_with("GET /v1/programs/abc HTTP/1.1"));
        let head = head.to_lowercase();
        assert!(head.contains("authorization: bearer test-token"));
        assert!(head.contains("accept: application/json"));
        assert!(head.contains("user-agent: intigritimcpserver/"));
    }

    #[tokio::test]
    async fn test_get_sends_query_string() {
        let (base, mut requests) = stub_server(http_response("200 OK", "", "[]")).await;
        let client = client_for(&base, Duration::from_secs(5));

        let request = ApiRequest::new(["v1", "programs"])
            .query("limit", 20)
            .query("offset", 40);
        client.get(&request).await.unwrap();

        let head = requests.recv().await.unwrap();
        assert!(head.starts_with("GET /v1/programs?limit=20&offset=40 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_upstream_error() {
        let (base, _requests) = stub_server(http_response(
            "401 Unauthorized",
            "",
            r#"{"message":"invalid token"}"#,
        ))
        .await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client
            .get(&ApiRequest::new(["v1", "programs"]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_failure());
        assert!(err.to_string().contains("invalid token"));
        assert!(!err.to_string().contains("test-token"));
    }

    #[tokio::test]
    async fn test_rate_limit_carries_retry_after() {
        let (base, _requests) = stub_server(http_response(
            "429 Too Many Requests",
            "Retry-After: 30\r\n",
            "{}",
        ))
        .await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client
            .get(&ApiRequest::new(["v1", "programs"]))
            .await
            .unwrap_err();
        match err {
            ApiError::Upstream {
                status,
                retry_after,
                ..
            } => {
                assert_eq!(status, 429);
                assert_eq!(retry_after.as_deref(), Some("30"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_body() {
        let (base, _requests) = stub_server(http_response("200 OK", "", "not json")).await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client
            .get(&ApiRequest::new(["v1", "programs"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unresponsive_upstream_times_out() {
        let base = silent_server().await;
        let client = client_for(&base, Duration::from_millis(200));

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            client.get(&ApiRequest::new(["v1", "programs"])),
        )
        .await
        .expect("client timeout should fire before the test guard");

        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr), Duration::from_secs(5));
        let err = client
            .get(&ApiRequest::new(["v1", "programs"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig::new("t").with_base_url("not a url");
        let err = IntigritiClient::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ApiConfig::new("super-secret");
        let client = IntigritiClient::new(&config).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }
}
