//! Survey Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::SurveyConfig;
use crate::domain::repository::{AnswerRepository, SessionRepository};
use crate::domain::sampler::CityBoundary;
use crate::presentation::handlers::{self, SurveyAppState};

/// Create a survey router for any repository implementation
pub fn survey_router_generic<R>(
    repo: R,
    config: SurveyConfig,
    boundary: Arc<CityBoundary>,
) -> Router
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    let state = SurveyAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        boundary,
    };

    Router::new()
        .route("/sessions", post(handlers::issue_session::<R>))
        .route(
            "/sessions/{session_id}/answers",
            post(handlers::submit_answers::<R>),
        )
        .route(
            "/sessions/{session_id}/renew",
            post(handlers::renew_session::<R>),
        )
        .route("/answers", get(handlers::list_answers::<R>))
        .with_state(state)
}
