//! In-Memory Repository Implementations
//!
//! Process-local store for tests and for running without a database.
//! Sessions are lost on restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::{Answer, Session};
use crate::domain::repository::{AnswerRepository, SessionRepository};
use crate::domain::value_objects::SessionId;
use crate::error::{SurveyError, SurveyResult};

#[derive(Default)]
struct Tables {
    sessions: Mutex<HashMap<SessionId, Session>>,
    answers: Mutex<Vec<Answer>>,
}

/// Mutex-guarded in-memory repository. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemorySurveyRepository {
    tables: Arc<Tables>,
}

impl MemorySurveyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live and expired-but-unswept sessions
    pub fn session_count(&self) -> SurveyResult<usize> {
        Ok(lock(&self.tables.sessions)?.len())
    }

    pub fn contains_session(&self, session_id: &SessionId) -> SurveyResult<bool> {
        Ok(lock(&self.tables.sessions)?.contains_key(session_id))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> SurveyResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| SurveyError::Internal("in-memory store lock poisoned".into()))
}

impl SessionRepository for MemorySurveyRepository {
    async fn insert(&self, session: &Session) -> SurveyResult<bool> {
        let mut sessions = lock(&self.tables.sessions)?;
        if sessions.contains_key(&session.id) {
            return Ok(false);
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(true)
    }

    async fn take(&self, session_id: &SessionId) -> SurveyResult<Option<Session>> {
        // Lookup and delete under one lock
        Ok(lock(&self.tables.sessions)?.remove(session_id))
    }

    async fn extend(
        &self,
        session_id: &SessionId,
        expires_at_ms: i64,
    ) -> SurveyResult<Option<i64>> {
        let mut sessions = lock(&self.tables.sessions)?;
        Ok(sessions.get_mut(session_id).map(|session| {
            session.expires_at_ms = session.expires_at_ms.max(expires_at_ms);
            session.expires_at_ms
        }))
    }

    async fn delete_expired(&self, now_ms: i64) -> SurveyResult<u64> {
        let mut sessions = lock(&self.tables.sessions)?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now_ms));
        Ok((before - sessions.len()) as u64)
    }
}

impl AnswerRepository for MemorySurveyRepository {
    async fn append(&self, answers: &[Answer]) -> SurveyResult<()> {
        lock(&self.tables.answers)?.extend_from_slice(answers);
        Ok(())
    }

    async fn all(&self) -> SurveyResult<Vec<Answer>> {
        Ok(lock(&self.tables.answers)?.clone())
    }
}
