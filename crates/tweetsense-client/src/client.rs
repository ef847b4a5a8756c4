//! HTTP client for the sentiment prediction/analytics service.
//!
//! Wraps `reqwest` with typed request and response bodies. Every endpoint
//! rejects non-2xx responses as [`ClientError::UnexpectedStatus`] and parses
//! the body itself so decode failures carry the endpoint URL as context.
//! There is no retry: a failed call is reported and the caller decides
//! whether to resubmit.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tweetsense_core::AppConfig;

use crate::error::ClientError;
use crate::types::{
    BatchPredictRequest, BatchPredictResponse, ExploreRequest, ExploreResponse, HealthResponse,
    MetaResponse, PredictRequest, PredictResponse,
};

/// Longest error body echoed back in [`ClientError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Client for the prediction service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// `base_url` may carry a path prefix (`https://host/api`); endpoints are
    /// resolved beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Liveness probe.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body does not match.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json("health").await
    }

    /// Fetches the explorer's filter options.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::health`].
    pub async fn meta(&self) -> Result<MetaResponse, ClientError> {
        self.get_json("meta").await
    }

    /// Classifies one text.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::health`]; the service answers 422 for empty text.
    pub async fn predict(&self, text: &str) -> Result<PredictResponse, ClientError> {
        self.post_json("predict", &PredictRequest { text }).await
    }

    /// Runs an explorer query.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::health`].
    pub async fn explore(&self, request: &ExploreRequest) -> Result<ExploreResponse, ClientError> {
        self.post_json("explore", request).await
    }

    /// Classifies many texts. The returned labels are positionally aligned
    /// with `texts`; the service does not echo identifiers.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::health`]; the service answers 422 for an empty
    /// list.
    pub async fn batch_predict(
        &self,
        texts: &[String],
    ) -> Result<BatchPredictResponse, ClientError> {
        self.post_json("batch_predict", &BatchPredictRequest { texts })
            .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::decode(response, &url).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::decode(response, &url).await
    }

    /// Asserts a 2xx status and parses the body as JSON.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
