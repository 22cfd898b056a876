//! Survey Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, sampling, validation, repository traits
//! - `application/` - Session store, use cases, background sweeper
//! - `infra/` - PostgreSQL and in-memory repositories, GeoJSON boundary loader
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Session Model
//! - Each session carries a fixed batch of points sampled inside the city boundary
//! - Sessions expire after a fixed TTL and can be renewed by anyone holding the id
//! - Redemption is atomic and single-use; an expired session is consumed too
//! - Answers are validated against the redeemed points, then appended

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SurveyConfig;
pub use application::session_store::SessionStore;
pub use application::sweeper::{SessionSweeper, SweeperHandle};
pub use domain::sampler::{CityBoundary, SamplingPlan};
pub use error::{SurveyError, SurveyResult};
pub use infra::boundary::load_city_boundary;
pub use infra::memory::MemorySurveyRepository;
pub use infra::postgres::PgSurveyRepository;
pub use presentation::router::survey_router_generic;
