//! HTTP handlers — one per named wizard operation. Handlers are thin glue:
//! they lock the session, call the named operation, and return the updated
//! view. The submission flow is the only place the lock is dropped and
//! re-acquired, around the outbound LLM call.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::profile::{EducationLevel, PersonalityTrait, TagField, WorkPreference};
use crate::state::AppState;
use crate::wizard::{SessionView, StepAdvance};

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub field: TagField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TraitRequest {
    pub label: PersonalityTrait,
}

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub education: Option<EducationLevel>,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub experience_level: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkPreferenceRequest {
    pub work_preference: WorkPreference,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.lock().await.view())
}

/// POST /api/v1/session/start
pub async fn handle_start(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.start_assessment()?;
    info!("assessment started");
    Ok(Json(session.view()))
}

/// POST /api/v1/session/back
pub async fn handle_back(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.step_back()?;
    Ok(Json(session.view()))
}

/// POST /api/v1/session/next
///
/// Advances the step; on the final step the continue action is the submit
/// action, so the submission flow runs instead.
pub async fn handle_next(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    {
        let mut session = state.session.lock().await;
        if let StepAdvance::Moved(_) = session.advance_step()? {
            return Ok(Json(session.view()));
        }
    }
    run_submission(&state).await.map(Json)
}

/// POST /api/v1/session/submit
pub async fn handle_submit(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    run_submission(&state).await.map(Json)
}

/// POST /api/v1/session/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.reset();
    info!("session reset");
    Json(session.view())
}

/// POST /api/v1/profile/tags
pub async fn handle_add_tag(
    State(state): State<AppState>,
    Json(req): Json<TagRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.add_tag(req.field, &req.value)?;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/profile/tags
pub async fn handle_remove_tag(
    State(state): State<AppState>,
    Json(req): Json<TagRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.remove_tag(req.field, &req.value)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/profile/traits
pub async fn handle_toggle_trait(
    State(state): State<AppState>,
    Json(req): Json<TraitRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.toggle_trait(req.label)?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/profile/education
pub async fn handle_set_education(
    State(state): State<AppState>,
    Json(req): Json<EducationRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.set_education(req.education)?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/profile/experience
pub async fn handle_set_experience(
    State(state): State<AppState>,
    Json(req): Json<ExperienceRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.set_experience_level(req.experience_level)?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/profile/work-preference
pub async fn handle_set_work_preference(
    State(state): State<AppState>,
    Json(req): Json<WorkPreferenceRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    session.set_work_preference(req.work_preference)?;
    Ok(Json(session.view()))
}

/// Drives one submission: Analyzing while the provider call is out, then
/// Results on success or back to Assessment on failure. A completion whose
/// session was reset (or resubmitted) in the meantime is discarded.
async fn run_submission(state: &AppState) -> Result<SessionView, AppError> {
    let (profile, ticket) = state.session.lock().await.begin_submission()?;
    info!(
        skills = profile.skills.len(),
        interests = profile.interests.len(),
        "requesting career recommendations"
    );

    match state.provider.recommend(&profile).await {
        Ok(recommendations) => {
            let mut session = state.session.lock().await;
            if !session.apply_results(ticket, recommendations) {
                warn!("discarding recommendations for a superseded submission");
            }
            Ok(session.view())
        }
        Err(err) => {
            let mut session = state.session.lock().await;
            if session.fail_submission(ticket) {
                Err(err.into())
            } else {
                warn!("discarding failure for a superseded submission: {err}");
                Ok(session.view())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use crate::models::profile::UserProfile;
    use crate::models::recommendation::{CareerRecommendation, RoadmapStep};
    use crate::recommendations::provider::{RecommendationError, RecommendationProvider};
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::wizard::WizardSession;

    struct FixedProvider(Vec<CareerRecommendation>);

    #[async_trait]
    impl RecommendationProvider for FixedProvider {
        async fn recommend(
            &self,
            _profile: &UserProfile,
        ) -> Result<Vec<CareerRecommendation>, RecommendationError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl RecommendationProvider for FailingProvider {
        async fn recommend(
            &self,
            _profile: &UserProfile,
        ) -> Result<Vec<CareerRecommendation>, RecommendationError> {
            Err(RecommendationError::Transport(
                "connection refused".to_string(),
            ))
        }
    }

    fn test_app(provider: Arc<dyn RecommendationProvider>) -> Router {
        build_router(AppState {
            session: Arc::new(Mutex::new(WizardSession::new())),
            provider,
        })
    }

    fn sample_recommendation(role: &str) -> CareerRecommendation {
        CareerRecommendation {
            role: role.to_string(),
            description: "A promising path".to_string(),
            match_percentage: 86.0,
            salary_range: "$45k - $100k".to_string(),
            market_demand: "High".to_string(),
            skills_to_learn: vec!["Fundamentals".to_string()],
            roadmap: vec![RoadmapStep {
                month: "Month 1".to_string(),
                milestone: "Get started".to_string(),
                resources: vec!["Intro course".to_string()],
            }],
            pros: vec!["Engaging".to_string()],
            cons: vec!["Competitive entry".to_string()],
        }
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Extractor rejections have plain-text bodies; map those to Null.
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app(Arc::new(FixedProvider(vec![])));
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_full_assessment_flow() {
        let app = test_app(Arc::new(FixedProvider(vec![
            sample_recommendation("Track & Field Coach"),
            sample_recommendation("Private Chef"),
        ])));

        let (status, view) = send(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["screen"], "Welcome");

        let (status, view) = send(&app, Method::POST, "/api/v1/session/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["screen"], "Assessment");
        assert_eq!(view["step"], 0);

        for skill in ["Sprinting", "Cooking"] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/v1/profile/tags",
                Some(json!({"field": "skills", "value": skill})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, view) = send(
            &app,
            Method::POST,
            "/api/v1/profile/tags",
            Some(json!({"field": "interests", "value": "Space"})),
        )
        .await;
        assert_eq!(view["profile"]["skills"], json!(["Sprinting", "Cooking"]));
        assert_eq!(view["profile"]["interests"], json!(["Space"]));

        let (status, view) = send(
            &app,
            Method::POST,
            "/api/v1/profile/traits",
            Some(json!({"label": "Competitive"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["profile"]["personalityTraits"], json!(["Competitive"]));

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/profile/education",
            Some(json!({"education": "Trade School / Certification"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, view) = send(
            &app,
            Method::PUT,
            "/api/v1/profile/work-preference",
            Some(json!({"work_preference": "Field Work"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["profile"]["workPreference"], "Field Work");

        // Walk to the final step, then continue once more to submit.
        for expected_step in 1..=3 {
            let (status, view) =
                send(&app, Method::POST, "/api/v1/session/next", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(view["step"], expected_step);
        }
        let (status, view) = send(&app, Method::POST, "/api/v1/session/next", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["screen"], "Results");
        let results = view["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["role"], "Track & Field Coach");
        assert_eq!(results[1]["role"], "Private Chef");

        let (status, view) = send(&app, Method::POST, "/api/v1/session/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["screen"], "Welcome");
        assert_eq!(view["step"], 0);
        assert_eq!(view["results"], json!([]));
        assert_eq!(
            serde_json::from_value::<UserProfile>(view["profile"].clone()).unwrap(),
            UserProfile::default()
        );
    }

    #[tokio::test]
    async fn test_failed_analysis_preserves_profile_and_returns_to_assessment() {
        let app = test_app(Arc::new(FailingProvider));

        send(&app, Method::POST, "/api/v1/session/start", None).await;
        send(
            &app,
            Method::POST,
            "/api/v1/profile/tags",
            Some(json!({"field": "skills", "value": "Carpentry"})),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/session/submit", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");

        // The session is editable again and nothing was lost.
        let (_, view) = send(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(view["screen"], "Assessment");
        assert_eq!(view["profile"]["skills"], json!(["Carpentry"]));
        assert_eq!(view["results"], json!([]));

        // Retry is possible immediately.
        let (status, _) = send(&app, Method::POST, "/api/v1/session/submit", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_zero_recommendations_still_reaches_results() {
        let app = test_app(Arc::new(FixedProvider(vec![])));

        send(&app, Method::POST, "/api/v1/session/start", None).await;
        let (status, view) = send(&app, Method::POST, "/api/v1/session/submit", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["screen"], "Results");
        assert_eq!(view["results"], json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_tag_is_a_noop() {
        let app = test_app(Arc::new(FixedProvider(vec![])));
        send(&app, Method::POST, "/api/v1/session/start", None).await;

        for _ in 0..2 {
            send(
                &app,
                Method::POST,
                "/api/v1/profile/tags",
                Some(json!({"field": "interests", "value": "Music"})),
            )
            .await;
        }
        let (_, view) = send(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(view["profile"]["interests"], json!(["Music"]));
    }

    #[tokio::test]
    async fn test_remove_tag() {
        let app = test_app(Arc::new(FixedProvider(vec![])));
        send(&app, Method::POST, "/api/v1/session/start", None).await;
        send(
            &app,
            Method::POST,
            "/api/v1/profile/tags",
            Some(json!({"field": "skills", "value": "Sales"})),
        )
        .await;

        let (status, view) = send(
            &app,
            Method::DELETE,
            "/api/v1/profile/tags",
            Some(json!({"field": "skills", "value": "Sales"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["profile"]["skills"], json!([]));
    }

    #[tokio::test]
    async fn test_operations_outside_assessment_are_conflicts() {
        let app = test_app(Arc::new(FixedProvider(vec![])));

        let (status, body) = send(&app, Method::POST, "/api/v1/session/back", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/profile/tags",
            Some(json!({"field": "skills", "value": "Cooking"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, Method::POST, "/api/v1/session/submit", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_catalog_label_is_rejected() {
        let app = test_app(Arc::new(FixedProvider(vec![])));
        send(&app, Method::POST, "/api/v1/session/start", None).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/profile/traits",
            Some(json!({"label": "Stoic"})),
        )
        .await;
        assert!(status.is_client_error());

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/profile/education",
            Some(json!({"education": "PhD"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_back_is_floored_at_first_step() {
        let app = test_app(Arc::new(FixedProvider(vec![])));
        send(&app, Method::POST, "/api/v1/session/start", None).await;

        let (status, view) = send(&app, Method::POST, "/api/v1/session/back", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["step"], 0);
    }
}
