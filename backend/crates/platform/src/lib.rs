//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographically secure random tokens
//! - Typed environment configuration loading

pub mod config;
pub mod crypto;
