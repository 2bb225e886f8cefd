//! HTTP adapter for the narrative generation service.
//!
//! Builds a fixed-template prompt from the application and its risk
//! assessment, invokes the generative-text service in non-streaming mode,
//! and degrades to [`NARRATIVE_FALLBACK`] on any failure. This is the
//! deliberate asymmetry of the pipeline: scoring failure is fatal,
//! narrative failure is cosmetic and never propagates.

use async_trait::async_trait;

use super::domain::{LoanApplication, RiskAssessment};

/// Text substituted when narrative generation fails for any reason.
pub const NARRATIVE_FALLBACK: &str = "AI summary unavailable.";

/// Remote capability turning a prompt into free text, best-effort.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn summarize(
        &self,
        application: &LoanApplication,
        assessment: &RiskAssessment,
    ) -> String;
}

/// Ollama-style client for the narrative service.
pub struct OllamaNarrativeClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaNarrativeClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model,
        }
    }

    pub fn with_client(client: reqwest::Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, NarrativeError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeError::Status(status.as_u16()));
        }

        let payload = response.json::<serde_json::Value>().await?;
        match payload.get("response").and_then(|value| value.as_str()) {
            Some(text) => Ok(text.to_string()),
            None => Err(NarrativeError::MissingResponseField),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for OllamaNarrativeClient {
    async fn summarize(
        &self,
        application: &LoanApplication,
        assessment: &RiskAssessment,
    ) -> String {
        let prompt = render_prompt(application, assessment);
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "narrative generation degraded to fallback");
                NARRATIVE_FALLBACK.to_string()
            }
        }
    }
}

/// Failures absorbed inside the adapter; never surfaced to the pipeline.
#[derive(Debug, thiserror::Error)]
enum NarrativeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("narrative service returned status {0}")]
    Status(u16),
    #[error("narrative response missing 'response' field")]
    MissingResponseField,
}

/// Render the banker-facing prompt. The probability of default is embedded
/// as `score * 100` with no rounding; risk factors are comma-joined or the
/// literal `None`; the FICO warning embeds its literal textual value.
pub(crate) fn render_prompt(
    application: &LoanApplication,
    assessment: &RiskAssessment,
) -> String {
    let pd_percent = assessment.pd_score.map(|score| score * 100.0).unwrap_or(0.0);

    let risk_factors = match &assessment.top_risk_factors {
        Some(factors) if !factors.is_empty() => factors.join(", "),
        _ => "None".to_string(),
    };

    let fico_warning = match assessment.fico_warning {
        Some(true) => "true",
        Some(false) => "false",
        None => "null",
    };

    let decision = assessment.decision.as_deref().unwrap_or("null");

    format!(
        "You are a bank risk analyst. Summarize this loan application decision in 2-3 sentences \n\
         for a banker. Be concise and professional.\n\
         Applicant: annual income ${}, DTI {}%, requested ${} for {}.\n\
         FICO score: {}-{}.\n\
         Model decision: {} with {}% probability of default.\n\
         Top risk factors: {}.\n\
         FICO warning: {}.",
        application.annual_inc,
        application.dti,
        application.loan_amnt,
        application.purpose,
        application.fico_range_low,
        application.fico_range_high,
        decision,
        pd_percent,
        risk_factors,
        fico_warning,
    )
}
