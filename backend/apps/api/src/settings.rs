//! Process Settings
//!
//! Everything the server reads from the environment, resolved once at startup.

use std::path::PathBuf;
use std::time::Duration;

use platform::config::{ConfigError, env_opt, env_or, split_list};
use survey::{SamplingPlan, SurveyConfig};

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Postgres connection string; the in-memory store is used when absent
    pub database_url: Option<String>,
    pub port: u16,
    pub city_boundary_path: PathBuf,
    pub frontend_origins: Vec<String>,
    pub survey: SurveyConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SurveyConfig::default();

        let session_ttl = session_ttl_from_secs(env_or(
            "SURVEY_SESSION_TTL_SECS",
            defaults.session_ttl.as_secs(),
        )?)?;
        let sweep_interval_secs: u64 =
            env_or("SURVEY_SWEEP_INTERVAL_SECS", defaults.sweep_interval.as_secs())?;
        if sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "SURVEY_SWEEP_INTERVAL_SECS".into(),
                message: "must be at least one second".into(),
            });
        }

        let sampling_plan: SamplingPlan = env_or("SURVEY_SAMPLING_PLAN", defaults.sampling_plan)?;

        let frontend_origins = split_list(
            &env_opt("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url: env_opt("DATABASE_URL"),
            port: env_or("PORT", 5000)?,
            city_boundary_path: PathBuf::from(env_or(
                "CITY_BOUNDARY_PATH",
                "citylimits.geojson.json".to_string(),
            )?),
            frontend_origins,
            survey: SurveyConfig {
                session_ttl,
                sweep_interval: Duration::from_secs(sweep_interval_secs),
                sampling_plan,
                ..defaults
            },
        })
    }
}

/// Accepts 1 second up to `SurveyConfig::MAX_SESSION_TTL`
fn session_ttl_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    let ttl = Duration::from_secs(secs);
    if secs == 0 || ttl > SurveyConfig::MAX_SESSION_TTL {
        return Err(ConfigError::Invalid {
            key: "SURVEY_SESSION_TTL_SECS".into(),
            message: format!(
                "must be between 1 and {} seconds",
                SurveyConfig::MAX_SESSION_TTL.as_secs()
            ),
        });
    }
    Ok(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(session_ttl_from_secs(900).unwrap(), Duration::from_secs(900));
        assert!(session_ttl_from_secs(SurveyConfig::MAX_SESSION_TTL.as_secs()).is_ok());

        assert!(session_ttl_from_secs(0).is_err());
        assert!(session_ttl_from_secs(SurveyConfig::MAX_SESSION_TTL.as_secs() + 1).is_err());
        assert!(session_ttl_from_secs(u64::MAX).is_err());
    }
}
