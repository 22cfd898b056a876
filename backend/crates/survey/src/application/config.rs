//! Application Configuration
//!
//! Configuration for the survey application layer.

use std::time::Duration;

use crate::domain::sampler::SamplingPlan;

/// Survey application configuration
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Lifetime of an issued (or renewed) session
    pub session_ttl: Duration,
    /// Cadence of the expired-session sweep
    pub sweep_interval: Duration,
    /// Fresh id draws allowed before giving up on a collision streak
    pub max_id_attempts: u32,
    /// Points per session and where they are drawn
    pub sampling_plan: SamplingPlan,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(15 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
            max_id_attempts: 16,
            sampling_plan: SamplingPlan::default(),
        }
    }
}

impl SurveyConfig {
    /// Upper bound accepted for `session_ttl` from configuration
    pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    /// TTL in milliseconds, saturating at `i64::MAX`
    pub fn session_ttl_ms(&self) -> i64 {
        i64::try_from(self.session_ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_ms() {
        assert_eq!(SurveyConfig::default().session_ttl_ms(), 900_000);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let config = SurveyConfig {
            session_ttl: Duration::from_secs(u64::MAX),
            ..SurveyConfig::default()
        };
        assert_eq!(config.session_ttl_ms(), i64::MAX);
    }
}
