//! Transport error classification and the status-keyed message tables used
//! to turn backend failures into field-level text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backend rejected the identity or code format
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Identity is already registered or otherwise conflicts
pub const STATUS_CONFLICT: u16 = 409;

/// How a failed network call should be explained to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelErrorKind {
    BadFormat,
    Conflict,
    Other,
}

/// Failure of a send, verify or lookup call against the backend.
///
/// `status` is the HTTP status when the backend answered, `None` when the
/// request never completed (connection refused, timeout, decode failure).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ChannelError {
    pub status: Option<u16>,
    pub message: String,
}

impl ChannelError {
    /// Error answered by the backend with an HTTP status
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Error raised before any status was received
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn bad_format(message: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(STATUS_CONFLICT, message)
    }

    /// Classify by status code
    pub fn kind(&self) -> ChannelErrorKind {
        match self.status {
            Some(STATUS_BAD_REQUEST) => ChannelErrorKind::BadFormat,
            Some(STATUS_CONFLICT) => ChannelErrorKind::Conflict,
            _ => ChannelErrorKind::Other,
        }
    }
}

/// User-facing text per error kind, with a fallback for everything else
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusMessages {
    pub bad_format: String,
    pub conflict: String,
    pub fallback: String,
}

impl StatusMessages {
    pub fn new(
        bad_format: impl Into<String>,
        conflict: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            bad_format: bad_format.into(),
            conflict: conflict.into(),
            fallback: fallback.into(),
        }
    }

    /// Pick the text for a failed call
    pub fn message_for(&self, error: &ChannelError) -> &str {
        match error.kind() {
            ChannelErrorKind::BadFormat => &self.bad_format,
            ChannelErrorKind::Conflict => &self.conflict,
            ChannelErrorKind::Other => &self.fallback,
        }
    }
}
