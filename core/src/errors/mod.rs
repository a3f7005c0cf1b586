//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    ChannelError, ChannelErrorKind, StatusMessages, STATUS_BAD_REQUEST, STATUS_CONFLICT,
};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    // Bridge to transport failures
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

pub type DomainResult<T> = Result<T, DomainError>;
