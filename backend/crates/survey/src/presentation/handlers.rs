//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::config::SurveyConfig;
use crate::application::issue_session::IssueSessionUseCase;
use crate::application::list_answers::ListAnswersUseCase;
use crate::application::renew_session::RenewSessionUseCase;
use crate::application::submit_answers::{SubmitAnswersInput, SubmitAnswersUseCase};
use crate::domain::repository::{AnswerRepository, SessionRepository};
use crate::domain::sampler::CityBoundary;
use crate::domain::value_objects::SessionId;
use crate::error::{SurveyError, SurveyResult};
use crate::presentation::dto::{
    AnswerCollection, RenewResponse, SessionResponse, SubmitAnswersRequest,
};

/// Shared state for survey handlers
#[derive(Clone)]
pub struct SurveyAppState<R>
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<SurveyConfig>,
    pub boundary: Arc<CityBoundary>,
}

/// A malformed id can never name a live session
fn parse_session_id(raw: &str) -> SurveyResult<SessionId> {
    SessionId::parse(raw).ok_or(SurveyError::SessionNotFound)
}

/// POST /api/survey/sessions
pub async fn issue_session<R>(
    State(state): State<SurveyAppState<R>>,
) -> SurveyResult<Json<SessionResponse>>
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    let use_case = IssueSessionUseCase::new(
        state.repo.clone(),
        state.boundary.clone(),
        state.config.clone(),
    );

    let output = use_case.execute().await?;

    Ok(Json(SessionResponse {
        session_id: output.session_id.to_string(),
        expires_at_ms: output.expires_at_ms,
        points: output.points,
    }))
}

/// POST /api/survey/sessions/{session_id}/answers
pub async fn submit_answers<R>(
    State(state): State<SurveyAppState<R>>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswersRequest>,
) -> SurveyResult<Response>
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        SubmitAnswersUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SubmitAnswersInput {
        session_id: parse_session_id(&session_id)?,
        answers: req.answers,
        include_all_answers: req.include_all_answers,
    };

    let output = use_case.execute(input).await?;

    Ok(match output.all_answers {
        Some(all) => Json(AnswerCollection::from(all.as_slice())).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /api/survey/sessions/{session_id}/renew
pub async fn renew_session<R>(
    State(state): State<SurveyAppState<R>>,
    Path(session_id): Path<String>,
) -> SurveyResult<Json<RenewResponse>>
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    let use_case = RenewSessionUseCase::new(state.repo.clone(), state.config.clone());

    let expires_at_ms = use_case.execute(&parse_session_id(&session_id)?).await?;

    Ok(Json(RenewResponse { expires_at_ms }))
}

/// GET /api/survey/answers
pub async fn list_answers<R>(
    State(state): State<SurveyAppState<R>>,
) -> SurveyResult<Json<AnswerCollection>>
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListAnswersUseCase::new(state.repo.clone());

    let answers = use_case.execute().await?;

    Ok(Json(AnswerCollection::from(answers.as_slice())))
}
