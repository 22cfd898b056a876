//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entities::{Answer, Session};
use crate::domain::value_objects::SessionId;
use crate::error::SurveyResult;

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a new session unless its id is already taken.
    /// Returns `false` on an id collision.
    async fn insert(&self, session: &Session) -> SurveyResult<bool>;

    /// Atomically delete a session and return it, expired or not
    async fn take(&self, session_id: &SessionId) -> SurveyResult<Option<Session>>;

    /// Move the expiry of a stored session to at least `expires_at_ms`.
    /// Returns the stored expiry, or `None` if the session is absent.
    async fn extend(
        &self,
        session_id: &SessionId,
        expires_at_ms: i64,
    ) -> SurveyResult<Option<i64>>;

    /// Delete every session expiring at or before `now_ms`
    async fn delete_expired(&self, now_ms: i64) -> SurveyResult<u64>;
}

/// Answer sink trait
#[trait_variant::make(AnswerRepository: Send)]
pub trait LocalAnswerRepository {
    /// Append a batch atomically
    async fn append(&self, answers: &[Answer]) -> SurveyResult<()>;

    /// Every stored answer, in insertion order
    async fn all(&self) -> SurveyResult<Vec<Answer>>;
}
