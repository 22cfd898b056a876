//! Domain Entities
//!
//! Core business entities for the survey domain.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AnswerLabel, Point, SessionId};

/// Session entity - a single-use token bound to a batch of sampled points
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub points: Vec<Point>,
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, points: Vec<Point>, ttl_ms: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            points,
            expires_at_ms: now.timestamp_millis().saturating_add(ttl_ms),
            created_at: now,
        }
    }

    /// A session is expired once `now` reaches its expiry.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms <= now_ms
    }
}

/// Answer entity - one labelled point, append-only
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub point: Point,
    pub label: AnswerLabel,
    pub answered_at_ms: i64,
}

impl Answer {
    /// Pair points with their labels; the whole batch shares one timestamp.
    pub fn batch(points: &[Point], labels: &[AnswerLabel], answered_at_ms: i64) -> Vec<Answer> {
        points
            .iter()
            .zip(labels)
            .map(|(&point, &label)| Answer {
                point,
                label,
                answered_at_ms,
            })
            .collect()
    }
}
