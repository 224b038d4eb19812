//! HTTP client for a running AnkiConnect instance.

use {
    crate::{
        Response, VERSION,
        request::{Request, RequestWrapper, Version},
    },
    anyhow::{Context, Result, bail},
    tracing::debug,
};

/// Default address AnkiConnect listens on.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8765";

/// Sends [`Request`]s to AnkiConnect.
#[derive(Debug, Clone)]
pub struct AnkiClient {
    /// Client used to send requests.
    pub http_client: reqwest::Client,
    /// URL AnkiConnect listens on.
    pub url: String,
    /// API key, if AnkiConnect requires one.
    pub api_key: Option<String>,
}

impl AnkiClient {
    /// Creates a client for the AnkiConnect instance at `url`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
            api_key,
        }
    }

    /// Sends a request, returning its result.
    ///
    /// # Errors
    ///
    /// Errors if the request cannot be sent, the response is not valid, or
    /// AnkiConnect reports an error.
    pub async fn send<R: Request>(&self, request: &R) -> Result<R::Response> {
        debug!(action = R::ACTION, "Sending AnkiConnect request");
        Ok(self
            .http_client
            .post(&self.url)
            .json(&RequestWrapper::new(request, self.api_key.as_deref()))
            .send()
            .await
            .context("failed to send")?
            .error_for_status()
            .context("HTTP error")?
            .json::<Response<R::Response>>()
            .await
            .context("failed to receive JSON response")?
            .into_result()?)
    }

    /// Checks that AnkiConnect supports the API [`VERSION`] that requests are
    /// written for.
    ///
    /// # Errors
    ///
    /// Errors if the version cannot be fetched, or is older than
    /// [`VERSION`].
    pub async fn check_version(&self) -> Result<u32> {
        let version = self
            .send(&Version)
            .await
            .context("failed to get AnkiConnect version")?;
        if version < VERSION {
            bail!("AnkiConnect API version {version} is too old, need at least {VERSION}");
        }
        Ok(version)
    }
}
