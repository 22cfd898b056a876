//! Shared Kernel - Domain-crossing minimal core
//!
//! Only the vocabulary every crate in the workspace agrees on lives here:
//! - [`error::kind::ErrorKind`] - HTTP-mapped error classification
//! - [`error::app_error::AppError`] - the unified error value handed to the transport
//! - `From` conversions for the third-party errors the services surface

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
