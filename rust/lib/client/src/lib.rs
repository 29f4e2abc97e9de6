//! Clover HTTP client.
//!
//! Typed access to the Clover REST API. Authentication is handled by a
//! pluggable [`TokenSource`]; every call goes through [`CloverApi`] so the
//! state layer can run against a fake in tests.
//!
//! # Usage
//!
//! ```ignore
//! use clover_client::{CloverClient, StaticToken, CloverApi};
//!
//! let client = CloverClient::new("https://api.clover.social", Arc::new(StaticToken::new(token)));
//! let feed = client.get_feed_detail("f1").await?;
//! ```

pub mod api;
pub mod model;
pub mod urls;


use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

pub use api::CloverApi;
pub use model::*;

// ── Error ───────────────────────────────────────────────────────────

/// Why a Clover call did not produce a value.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer. `message` is the raw response body.
    #[error("server answered {status}: {message}")]
    Server { status: u16, message: String },

    /// The request never completed (DNS, refused connection, timeout).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// No usable credentials could be produced for the request.
    #[error("no credentials: {0}")]
    Auth(String),

    /// 2xx answer whose body is not the expected `{"data": ...}` shape.
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code of a [`ApiError::Server`] answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401, which means the stored session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

// ── Credentials ─────────────────────────────────────────────────────

/// Supplies the bearer token for each request.
///
/// Asked once per call, so a source backed by session storage sees a
/// login or logout immediately. `None` sends the request anonymously.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Never attaches a token. Used for login and register.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// A fixed token, for scripts and tests.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

// ── CloverClient ────────────────────────────────────────────────────

/// HTTP implementation of [`CloverApi`].
///
/// All endpoints live under `{base_url}/api/v1` and answer with a
/// `{"data": ...}` envelope.
pub struct CloverClient {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
}

impl CloverClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request with auth header.
    async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Turn a non-2xx answer into [`ApiError::Server`], keeping the body.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Unwrap the `data` envelope of a successful answer.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        Self::check(resp)
            .await?
            .json::<Envelope<R>>()
            .await
            .map(|env| env.data)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn expect_ok(resp: reqwest::Response) -> Result<(), ApiError> {
        Self::check(resp).await.map(drop)
    }

    pub(crate) async fn get<R, Q>(&self, path: &str, query: &Q) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(path, "GET");
        let req = self.http.get(self.url(path)).query(query);
        let resp = self.authed(req).await?.send().await?;
        Self::parse(resp).await
    }

    pub(crate) async fn post_json<R, B>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(path, "POST");
        let req = self.http.post(self.url(path)).json(body);
        let resp = self.authed(req).await?.send().await?;
        Self::parse(resp).await
    }

    /// POST a JSON body to an endpoint whose response carries no data.
    pub(crate) async fn post_json_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, "POST");
        let req = self.http.post(self.url(path)).json(body);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_ok(resp).await
    }

    pub(crate) async fn post_query<Q>(&self, path: &str, query: &Q) -> Result<(), ApiError>
    where
        Q: Serialize + ?Sized,
    {
        debug!(path, "POST");
        let req = self.http.post(self.url(path)).query(query);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_ok(resp).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), ApiError> {
        debug!(path, "POST multipart");
        let req = self.http.post(self.url(path)).multipart(form);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_ok(resp).await
    }

    pub(crate) async fn delete<Q>(&self, path: &str, query: &Q) -> Result<(), ApiError>
    where
        Q: Serialize + ?Sized,
    {
        debug!(path, "DELETE");
        let req = self.http.delete(self.url(path)).query(query);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_ok(resp).await
    }
}
