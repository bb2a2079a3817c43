use std::sync::Arc;

use tokio::sync::Mutex;

use crate::recommendations::provider::RecommendationProvider;
use crate::wizard::WizardSession;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// One in-memory assessment session per process. All mutation is serialized
/// through the session lock; the lock is never held across the outbound LLM
/// await, so the process stays responsive while a submission is analyzing.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<WizardSession>>,
    /// Pluggable recommendation backend. Production: `GeminiRecommendations`.
    pub provider: Arc<dyn RecommendationProvider>,
}
