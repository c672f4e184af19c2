//! HTTP transport used by the client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::config::FacebookConfig;
use crate::error::FacebookResult;
use crate::response::RawResponse;

/// Failure to obtain any HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Whether the error was a timeout.
    pub is_timeout: bool,
    /// Whether the error was a connection failure.
    pub is_connect: bool,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            is_timeout: err.is_timeout(),
            is_connect: err.is_connect(),
        }
    }
}

/// Issues GETs and POSTs and hands back the status code and body.
///
/// Any status code is a successful transport outcome; interpreting it is the
/// client's job.
#[async_trait]
pub trait WebRequestor: Send + Sync {
    /// GET `url`, which already carries its query string.
    async fn execute_get(&self, url: &str) -> Result<RawResponse, TransportError>;

    /// POST `body` as `application/x-www-form-urlencoded` to `url`.
    async fn execute_post(&self, url: &str, body: &str) -> Result<RawResponse, TransportError>;
}

/// [`WebRequestor`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestWebRequestor {
    client: Client,
}

impl ReqwestWebRequestor {
    /// Build a requestor with the configured timeout and user agent.
    pub fn new(config: &FacebookConfig) -> FacebookResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent())
            .build()
            .map_err(TransportError::from)?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, TransportError> {
        let status_code = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status_code, body })
    }
}

#[async_trait]
impl WebRequestor for ReqwestWebRequestor {
    async fn execute_get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    async fn execute_post(&self, url: &str, body: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await?;
        Self::read(response).await
    }
}
