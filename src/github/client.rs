// GitHub API HTTP client.
// Handles optional authentication, rate limit tracking, and status mapping.

use std::sync::Mutex;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{FolioError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with rate limit tracking.
///
/// Requests go to `api_base`; repository file contents are read from
/// `raw_base`. Both are overridable so the client can point at a mock server.
pub struct GitHubClient {
    client: Client,
    api_base: String,
    raw_base: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a client against the public endpoints, authenticated if a token is given.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_urls(token, GITHUB_API_BASE, GITHUB_RAW_BASE)
    }

    /// Create a client against custom API and raw-content base URLs.
    pub fn with_base_urls(token: Option<&str>, api_base: &str, raw_base: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| FolioError::Config(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-portfolio-sync"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Create a client, picking up GITHUB_TOKEN from the environment when set.
    pub fn from_env(api_base: &str, raw_base: &str) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        Self::with_base_urls(token.as_deref(), api_base, raw_base)
    }

    /// Snapshot of the most recently observed rate limit headers.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Base URL for raw repository file contents.
    pub fn raw_base(&self) -> &str {
        &self.raw_base
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(FolioError::Api)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(FolioError::Api)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Make a GET request to an absolute URL (raw file contents).
    pub async fn get_url(&self, url: &str) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(FolioError::Api)?;
        self.check_response(response).await
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };

        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = Some(remaining);
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED => Err(FolioError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(FolioError::NotFound(url))
            }
            StatusCode::FORBIDDEN if self.rate_limit().remaining == Some(0) => {
                let reset_at = chrono::DateTime::from_timestamp(self.rate_limit().reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(FolioError::RateLimited { reset_at })
            }
            status => Err(FolioError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap();

        let err = client.get("/missing").await.unwrap_err();
        assert!(err.is_not_found());

        match client.get("/broken").await.unwrap_err() {
            FolioError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/someone"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-limit", "60")
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1700000000"),
            )
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap();
        let err = client.get("/users/someone").await.unwrap_err();

        assert!(matches!(err, FolioError::RateLimited { .. }));
        let limit = client.rate_limit();
        assert_eq!(limit.limit, 60);
        assert_eq!(limit.remaining, Some(0));
        assert_eq!(limit.reset, 1_700_000_000);
    }

    #[tokio::test]
    async fn test_forbidden_without_exhausted_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap();
        let err = client.get("/anything").await.unwrap_err();
        assert!(matches!(err, FolioError::Http { status: 403, .. }));
    }
}
