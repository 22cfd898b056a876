//! Session Store
//!
//! Session lifecycle on top of a [`SessionRepository`]: issue, single-use
//! redemption, renewal and expiry sweeping.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::SurveyConfig;
use crate::domain::entities::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::{Point, SessionId};
use crate::error::{SurveyError, SurveyResult};

pub struct SessionStore<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<SurveyConfig>,
}

impl<S> Clone for SessionStore<S>
where
    S: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            session_repo: self.session_repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SessionStore<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<SurveyConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Persist `points` under a fresh id, retrying on id collisions.
    pub async fn create(&self, points: Vec<Point>) -> SurveyResult<Session> {
        let mut session = Session::new(SessionId::generate(), points, self.config.session_ttl_ms());

        for attempt in 1..=self.config.max_id_attempts {
            if self.session_repo.insert(&session).await? {
                tracing::info!(
                    session_id = %session.id,
                    points = session.points.len(),
                    expires_at_ms = session.expires_at_ms,
                    "Session created"
                );
                return Ok(session);
            }

            tracing::warn!(attempt, "Session id collision, drawing a new one");
            session.id = SessionId::generate();
        }

        Err(SurveyError::CollisionExhausted {
            attempts: self.config.max_id_attempts,
        })
    }

    /// Consume a session and hand back its points.
    ///
    /// The record is gone afterwards whatever the outcome, expired included.
    pub async fn redeem(&self, session_id: &SessionId) -> SurveyResult<Vec<Point>> {
        let session = self
            .session_repo
            .take(session_id)
            .await?
            .ok_or(SurveyError::SessionNotFound)?;

        if session.is_expired_at(Utc::now().timestamp_millis()) {
            tracing::info!(session_id = %session_id, "Redeemed an expired session");
            return Err(SurveyError::SessionExpired);
        }

        tracing::info!(session_id = %session_id, "Session redeemed");
        Ok(session.points)
    }

    /// Push expiry to now + TTL. Any holder of the id may do this, repeatedly.
    pub async fn renew(&self, session_id: &SessionId) -> SurveyResult<i64> {
        let now_ms = Utc::now().timestamp_millis();
        let expires_at_ms = self
            .session_repo
            .extend(session_id, now_ms.saturating_add(self.config.session_ttl_ms()))
            .await?
            .ok_or(SurveyError::SessionNotFound)?;

        tracing::info!(session_id = %session_id, expires_at_ms, "Session renewed");
        Ok(expires_at_ms)
    }

    /// Remove every session whose TTL has elapsed
    pub async fn sweep_expired(&self) -> SurveyResult<u64> {
        let removed = self
            .session_repo
            .delete_expired(Utc::now().timestamp_millis())
            .await?;

        if removed > 0 {
            tracing::info!(removed, "Swept expired sessions");
        } else {
            tracing::debug!("No expired sessions to sweep");
        }
        Ok(removed)
    }
}
