//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod issue_session;
pub mod list_answers;
pub mod renew_session;
pub mod session_store;
pub mod submit_answers;
pub mod sweeper;
