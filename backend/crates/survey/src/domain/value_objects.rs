//! Domain Value Objects
//!
//! Immutable value types for the survey domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes behind a session id (64 hex characters)
pub const SESSION_ID_BYTES: usize = 32;

/// Geographic point, longitude first
///
/// Serialized as a GeoJSON position: `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Point {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.lon, p.lat]
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        geo::Point::new(p.lon, p.lat)
    }
}

/// Opaque, unguessable session token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Draw a fresh id from the OS CSPRNG
    pub fn generate() -> Self {
        Self(platform::crypto::random_hex_token(SESSION_ID_BYTES))
    }

    /// Accept only well-formed tokens; anything else cannot name a session.
    pub fn parse(raw: &str) -> Option<Self> {
        platform::crypto::is_hex_token(raw, SESSION_ID_BYTES).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binary answer label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerLabel(u8);

impl AnswerLabel {
    pub const VALID: [u8; 2] = [0, 1];

    pub fn new(value: i64) -> Option<Self> {
        Self::VALID
            .iter()
            .find(|&&v| i64::from(v) == value)
            .map(|&v| Self(v))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}
