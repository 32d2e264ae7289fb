use std::error::Error as _;
use std::time::Duration;

use acervo_core::{AcervoError, AcervoResult};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// `HEAD`, headers only.
    Head,
    /// `GET` with the body left unread.
    Probe,
    /// `GET` with the body read as text.
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub mode: FetchMode,
    pub url: String,
}

impl FetchRequest {
    pub fn head(url: impl Into<String>) -> Self {
        Self {
            mode: FetchMode::Head,
            url: url.into(),
        }
    }

    pub fn probe(url: impl Into<String>) -> Self {
        Self {
            mode: FetchMode::Probe,
            url: url.into(),
        }
    }

    pub fn body(url: impl Into<String>) -> Self {
        Self {
            mode: FetchMode::Body,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl FetchResponse {
    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Issues exactly one outbound request per call.
///
/// Transport failures come back as [`AcervoError::Network`]; any HTTP status,
/// including error statuses, is a successful fetch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> AcervoResult<FetchResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> AcervoResult<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AcervoError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> AcervoResult<FetchResponse> {
        let builder = match request.mode {
            FetchMode::Head => self.client.head(&request.url),
            FetchMode::Probe | FetchMode::Body => self.client.get(&request.url),
        };

        tracing::debug!(url = %request.url, mode = ?request.mode, "sending request");

        let response = builder.send().await.map_err(|err| {
            tracing::debug!(url = %request.url, error = %err, "request failed");
            AcervoError::Network(describe_transport_error(&err))
        })?;

        let status = response.status().as_u16();
        tracing::debug!(url = %request.url, status, "response received");

        let body = match request.mode {
            FetchMode::Body => Some(response.text().await.map_err(|err| {
                AcervoError::Network(format!("failed to read response body: {err}"))
            })?),
            FetchMode::Head | FetchMode::Probe => None,
        };

        Ok(FetchResponse { status, body })
    }
}

/// Flattens a reqwest error and its source chain into one line.
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    };
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
