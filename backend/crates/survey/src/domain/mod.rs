//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Session, Answer)
//! - Domain value objects (Point, SessionId, AnswerLabel)
//! - Constrained point sampling inside the city boundary
//! - Answer validation
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod sampler;
pub mod services;
pub mod value_objects;
