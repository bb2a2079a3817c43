pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::wizard::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session state machine
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route("/api/v1/session/start", post(handlers::handle_start))
        .route("/api/v1/session/back", post(handlers::handle_back))
        .route("/api/v1/session/next", post(handlers::handle_next))
        .route("/api/v1/session/submit", post(handlers::handle_submit))
        .route("/api/v1/session/reset", post(handlers::handle_reset))
        // Profile editing
        .route(
            "/api/v1/profile/tags",
            post(handlers::handle_add_tag).delete(handlers::handle_remove_tag),
        )
        .route("/api/v1/profile/traits", post(handlers::handle_toggle_trait))
        .route(
            "/api/v1/profile/education",
            put(handlers::handle_set_education),
        )
        .route(
            "/api/v1/profile/experience",
            put(handlers::handle_set_experience),
        )
        .route(
            "/api/v1/profile/work-preference",
            put(handlers::handle_set_work_preference),
        )
        .with_state(state)
}
