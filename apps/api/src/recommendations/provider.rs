//! Recommendation provider — serializes a profile into the career prompt,
//! invokes the LLM, and validates the structured response.
//!
//! `AppState` carries an `Arc<dyn RecommendationProvider>` so handler code is
//! backend-agnostic and tests can swap in fixed or failing providers.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::models::profile::UserProfile;
use crate::models::recommendation::{validate_recommendations, CareerRecommendation};
use crate::recommendations::prompts::{build_career_prompt, response_schema};

/// Failure kinds for one recommendation request. The UI boundary collapses
/// all of them into a single generic notification; they stay distinguishable
/// here for logging and tests.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Format(String),

    #[error("invalid recommendation data: {0}")]
    Validation(String),
}

impl From<LlmError> for RecommendationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => RecommendationError::Transport(e.to_string()),
            LlmError::Api { status, message } => {
                RecommendationError::Transport(format!("backend returned {status}: {message}"))
            }
        }
    }
}

/// The recommendation backend seam.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Produces an ordered set of career recommendations for a profile, or
    /// fails with a distinguishable kind. Zero recommendations is a valid
    /// (degenerate) result, not a failure.
    async fn recommend(
        &self,
        profile: &UserProfile,
    ) -> Result<Vec<CareerRecommendation>, RecommendationError>;
}

/// Production provider backed by the Gemini structured-output call.
pub struct GeminiRecommendations {
    llm: LlmClient,
}

impl GeminiRecommendations {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RecommendationProvider for GeminiRecommendations {
    async fn recommend(
        &self,
        profile: &UserProfile,
    ) -> Result<Vec<CareerRecommendation>, RecommendationError> {
        // A doomed call is rejected before it leaves the process.
        if !self.llm.has_api_key() {
            return Err(RecommendationError::Configuration(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }

        let prompt = build_career_prompt(profile);
        let response = self.llm.generate(&prompt, response_schema()).await?;

        // A response with no text is the degenerate zero-recommendation case.
        let recommendations = parse_recommendations(response.text().unwrap_or("[]"))?;
        info!(
            "received {} career recommendation(s)",
            recommendations.len()
        );
        Ok(recommendations)
    }
}

/// Validating parse of the backend payload. Never yields partial records:
/// any shape mismatch fails the whole call.
pub(crate) fn parse_recommendations(
    payload: &str,
) -> Result<Vec<CareerRecommendation>, RecommendationError> {
    let payload = strip_json_fences(payload);
    let recommendations: Vec<CareerRecommendation> =
        serde_json::from_str(payload).map_err(|e| {
            warn!("failed to parse recommendation payload: {e}");
            RecommendationError::Format(e.to_string())
        })?;
    validate_recommendations(&recommendations).map_err(RecommendationError::Validation)?;
    Ok(recommendations)
}
