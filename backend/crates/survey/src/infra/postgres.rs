//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entities::{Answer, Session};
use crate::domain::repository::{AnswerRepository, SessionRepository};
use crate::domain::value_objects::{AnswerLabel, Point, SessionId};
use crate::error::{SurveyError, SurveyResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgSurveyRepository {
    pool: PgPool,
}

impl PgSurveyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for PgSurveyRepository {
    async fn insert(&self, session: &Session) -> SurveyResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO survey_sessions (
                session_id,
                points,
                expires_at_ms,
                created_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(session.id.as_str())
        .bind(Json(&session.points))
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn take(&self, session_id: &SessionId) -> SurveyResult<Option<Session>> {
        // Single statement: concurrent takers and the sweep cannot both see the row
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            DELETE FROM survey_sessions
            WHERE session_id = $1
            RETURNING
                session_id,
                points,
                expires_at_ms,
                created_at
            "#,
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn extend(
        &self,
        session_id: &SessionId,
        expires_at_ms: i64,
    ) -> SurveyResult<Option<i64>> {
        let expires_at_ms = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE survey_sessions
            SET expires_at_ms = GREATEST(expires_at_ms, $2)
            WHERE session_id = $1
            RETURNING expires_at_ms
            "#,
        )
        .bind(session_id.as_str())
        .bind(expires_at_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expires_at_ms)
    }

    async fn delete_expired(&self, now_ms: i64) -> SurveyResult<u64> {
        let deleted = sqlx::query("DELETE FROM survey_sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

impl AnswerRepository for PgSurveyRepository {
    async fn append(&self, answers: &[Answer]) -> SurveyResult<()> {
        let mut tx = self.pool.begin().await?;

        for answer in answers {
            sqlx::query(
                r#"
                INSERT INTO survey_answers (
                    lon,
                    lat,
                    answer_val,
                    answered_at_ms
                ) VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(answer.point.lon)
            .bind(answer.point.lat)
            .bind(i16::from(answer.label.value()))
            .bind(answer.answered_at_ms)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn all(&self) -> SurveyResult<Vec<Answer>> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT
                lon,
                lat,
                answer_val,
                answered_at_ms
            FROM survey_answers
            ORDER BY answer_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AnswerRow::into_answer).collect()
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    points: Json<Vec<Point>>,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> SurveyResult<Session> {
        let id = SessionId::parse(&self.session_id).ok_or_else(|| {
            SurveyError::Internal(format!("malformed stored session id '{}'", self.session_id))
        })?;

        Ok(Session {
            id,
            points: self.points.0,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    lon: f64,
    lat: f64,
    answer_val: i16,
    answered_at_ms: i64,
}

impl AnswerRow {
    fn into_answer(self) -> SurveyResult<Answer> {
        let label = AnswerLabel::new(i64::from(self.answer_val)).ok_or_else(|| {
            SurveyError::Internal(format!("stored answer has invalid label {}", self.answer_val))
        })?;

        Ok(Answer {
            point: Point::new(self.lon, self.lat),
            label,
            answered_at_ms: self.answered_at_ms,
        })
    }
}
