//! Infrastructure Layer
//!
//! Repository implementations and the city boundary source.

pub mod boundary;
pub mod memory;
pub mod postgres;
