//! Issue Session Use Case

use std::sync::Arc;

use crate::application::config::SurveyConfig;
use crate::application::session_store::SessionStore;
use crate::domain::repository::SessionRepository;
use crate::domain::sampler::CityBoundary;
use crate::domain::value_objects::{Point, SessionId};
use crate::error::SurveyResult;

/// Output DTO for issue session
#[derive(Debug, Clone)]
pub struct IssueSessionOutput {
    pub session_id: SessionId,
    pub expires_at_ms: i64,
    pub points: Vec<Point>,
}

/// Issue Session Use Case
pub struct IssueSessionUseCase<S>
where
    S: SessionRepository,
{
    store: SessionStore<S>,
    boundary: Arc<CityBoundary>,
    config: Arc<SurveyConfig>,
}

impl<S> IssueSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, boundary: Arc<CityBoundary>, config: Arc<SurveyConfig>) -> Self {
        Self {
            store: SessionStore::new(session_repo, config.clone()),
            boundary,
            config,
        }
    }

    pub async fn execute(&self) -> SurveyResult<IssueSessionOutput> {
        let points = {
            let mut rng = rand::rng();
            self.config.sampling_plan.draw(&self.boundary, &mut rng)
        };

        let session = self.store.create(points).await?;

        Ok(IssueSessionOutput {
            session_id: session.id,
            expires_at_ms: session.expires_at_ms,
            points: session.points,
        })
    }
}
