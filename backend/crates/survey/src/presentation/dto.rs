//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::Answer;
use crate::domain::value_objects::Point;

/// Response for POST /api/survey/sessions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub expires_at_ms: i64,
    pub points: Vec<Point>,
}

/// Request for POST /api/survey/sessions/{id}/answers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<i64>,
    #[serde(default)]
    pub include_all_answers: bool,
}

/// Response for POST /api/survey/sessions/{id}/renew
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewResponse {
    pub expires_at_ms: i64,
}

/// GeoJSON FeatureCollection of recorded answers
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<AnswerFeature>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: AnswerProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: Point,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerProperties {
    pub answer: u8,
    pub answered_at_ms: i64,
}

impl From<&Answer> for AnswerFeature {
    fn from(answer: &Answer) -> Self {
        Self {
            kind: "Feature",
            geometry: PointGeometry {
                kind: "Point",
                coordinates: answer.point,
            },
            properties: AnswerProperties {
                answer: answer.label.value(),
                answered_at_ms: answer.answered_at_ms,
            },
        }
    }
}

impl From<&[Answer]> for AnswerCollection {
    fn from(answers: &[Answer]) -> Self {
        Self {
            kind: "FeatureCollection",
            features: answers.iter().map(AnswerFeature::from).collect(),
        }
    }
}
