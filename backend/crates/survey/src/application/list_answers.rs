//! List Answers Use Case

use std::sync::Arc;

use crate::domain::entities::Answer;
use crate::domain::repository::AnswerRepository;
use crate::error::SurveyResult;

pub struct ListAnswersUseCase<A>
where
    A: AnswerRepository,
{
    answer_repo: Arc<A>,
}

impl<A> ListAnswersUseCase<A>
where
    A: AnswerRepository,
{
    pub fn new(answer_repo: Arc<A>) -> Self {
        Self { answer_repo }
    }

    pub async fn execute(&self) -> SurveyResult<Vec<Answer>> {
        let answers = self.answer_repo.all().await?;
        tracing::debug!(count = answers.len(), "Listed answers");
        Ok(answers)
    }
}
