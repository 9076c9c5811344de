//! HTTP client construction and the shared request/response handling.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tasks::GatewayError;
use tracing::debug;

/// Media type GitHub recommends for REST requests.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned on every request.
const GITHUB_API_VERSION: &str = "2022-11-28";

const API_VERSION_HEADER: &str = "x-github-api-version";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A GitHub access token.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token, returning `None` if it is empty or only whitespace.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub rest_url: String,
    /// Full URL of the GraphQL endpoint.
    pub graphql_url: String,
    /// Token sent as a bearer credential.
    pub token: ApiToken,
    /// Upper bound on each request, connect to last byte.
    pub timeout: Duration,
    /// `User-Agent` header value (GitHub rejects requests without one).
    pub user_agent: String,
}

impl GithubConfig {
    /// Public GitHub REST endpoint.
    pub const DEFAULT_REST_URL: &'static str = "https://api.github.com";

    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Settings for github.com with the given token.
    pub fn new(token: ApiToken) -> Self {
        Self {
            rest_url: Self::DEFAULT_REST_URL.to_owned(),
            graphql_url: format!("{}/graphql", Self::DEFAULT_REST_URL),
            token,
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: concat!("issue-sync/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// GitHub REST + GraphQL client.
///
/// Implements [`tasks::IssueTracker`] (in `rest`) and [`tasks::ProjectBoard`]
/// (in `graphql`). Requests are sent one at a time by the caller; the client
/// itself never retries.
#[derive(Debug, Clone)]
pub struct GithubClient {
    pub(crate) http: reqwest::Client,
    pub(crate) rest_url: String,
    pub(crate) graphql_url: String,
}

impl GithubClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Transport`] if the token is not a valid header value or
    /// the TLS backend cannot be initialised.
    pub fn new(config: GithubConfig) -> Result<Self, GatewayError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.expose()))
            .map_err(|_| GatewayError::Transport {
                message: "token contains characters not allowed in an HTTP header".to_owned(),
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http,
            rest_url: config.rest_url.trim_end_matches('/').to_owned(),
            graphql_url: config.graphql_url,
        })
    }

    /// Sends `request` and decodes a JSON body from a 2xx response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "GitHub responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode {
                message: err.to_string(),
            })
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        message: err.to_string(),
    }
}

/// Builds a [`GatewayError::Decode`] for a missing or empty field.
pub(crate) fn missing(field: &str) -> GatewayError {
    GatewayError::Decode {
        message: format!("response field `{field}` is missing or empty"),
    }
}
