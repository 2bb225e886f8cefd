//! HTTP adapter for the remote risk scoring service.
//!
//! Wraps the scoring service's `/predict` endpoint using [`reqwest`]. The
//! canonical application is posted as-is; its snake_case field names are the
//! wire keys the scorer expects. Any transport error or non-2xx response is
//! fatal for the current request: there is no approved path to persist a
//! record without a risk assessment.

use async_trait::async_trait;

use super::domain::{LoanApplication, RiskAssessment};

/// Remote capability turning an application into a risk assessment.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    async fn assess(&self, application: &LoanApplication)
        -> Result<RiskAssessment, ScoringError>;
}

/// Errors from the scoring adapter. Always aborts the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring service unavailable: {0}")]
    Unavailable(String),
}

/// HTTP client for a single scoring service instance.
pub struct HttpScoringClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScoringClient {
    /// Create a new adapter for the scoring service.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:8000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an adapter reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across adapters).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl RiskScorer for HttpScoringClient {
    /// Score one application. One outbound call per invocation; no retry,
    /// no caching.
    async fn assess(
        &self,
        application: &LoanApplication,
    ) -> Result<RiskAssessment, ScoringError> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(application)
            .send()
            .await
            .map_err(|err| ScoringError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ScoringError::Unavailable(format!(
                "status {status}: {body}"
            )));
        }

        response
            .json::<RiskAssessment>()
            .await
            .map_err(|err| ScoringError::Unavailable(err.to_string()))
    }
}
