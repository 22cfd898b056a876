//! Submit Answers Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::SurveyConfig;
use crate::application::session_store::SessionStore;
use crate::domain::entities::Answer;
use crate::domain::repository::{AnswerRepository, SessionRepository};
use crate::domain::services::validate_answers;
use crate::domain::value_objects::SessionId;
use crate::error::SurveyResult;

/// Input DTO for submit answers
#[derive(Debug, Clone)]
pub struct SubmitAnswersInput {
    pub session_id: SessionId,
    /// Raw labels in point order, validated after redemption
    pub answers: Vec<i64>,
    pub include_all_answers: bool,
}

/// Output DTO for submit answers
#[derive(Debug, Clone)]
pub struct SubmitAnswersOutput {
    pub recorded: usize,
    pub all_answers: Option<Vec<Answer>>,
}

/// Submit Answers Use Case
pub struct SubmitAnswersUseCase<S, A>
where
    S: SessionRepository,
    A: AnswerRepository,
{
    store: SessionStore<S>,
    answer_repo: Arc<A>,
}

impl<S, A> SubmitAnswersUseCase<S, A>
where
    S: SessionRepository,
    A: AnswerRepository,
{
    pub fn new(session_repo: Arc<S>, answer_repo: Arc<A>, config: Arc<SurveyConfig>) -> Self {
        Self {
            store: SessionStore::new(session_repo, config),
            answer_repo,
        }
    }

    /// Redeem first: a rejected submission still burns the session.
    pub async fn execute(&self, input: SubmitAnswersInput) -> SurveyResult<SubmitAnswersOutput> {
        let points = self.store.redeem(&input.session_id).await?;

        let labels = validate_answers(&points, &input.answers).inspect_err(|e| {
            tracing::warn!(session_id = %input.session_id, error = %e, "Rejected answers");
        })?;

        let answers = Answer::batch(&points, &labels, Utc::now().timestamp_millis());
        self.answer_repo.append(&answers).await?;

        tracing::info!(
            session_id = %input.session_id,
            recorded = answers.len(),
            "Answers recorded"
        );

        let all_answers = if input.include_all_answers {
            Some(self.answer_repo.all().await?)
        } else {
            None
        };

        Ok(SubmitAnswersOutput {
            recorded: answers.len(),
            all_answers,
        })
    }
}
