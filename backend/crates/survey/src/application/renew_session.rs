//! Renew Session Use Case

use std::sync::Arc;

use crate::application::config::SurveyConfig;
use crate::application::session_store::SessionStore;
use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::SessionId;
use crate::error::SurveyResult;

pub struct RenewSessionUseCase<S>
where
    S: SessionRepository,
{
    store: SessionStore<S>,
}

impl<S> RenewSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<SurveyConfig>) -> Self {
        Self {
            store: SessionStore::new(session_repo, config),
        }
    }

    /// Returns the new expiry (Unix ms)
    pub async fn execute(&self, session_id: &SessionId) -> SurveyResult<i64> {
        self.store.renew(session_id).await
    }
}
