//! Trait for the channel a flow verifies an identity through

use async_trait::async_trait;

use crate::errors::ChannelError;

/// One invalid identity input, by position in `FlowConfig::identity_fields`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub identity_field: usize,
    pub message: Option<String>,
}

/// Why an identity failed local validation.
///
/// With no `field_errors` the message is shown on every identity input; a
/// missing message falls back to the flow's `identity_invalid` text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityRejection {
    pub message: Option<String>,
    pub field_errors: Vec<FieldError>,
}

impl IdentityRejection {
    /// Reject every identity input with the default text
    pub fn broadcast() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            field_errors: Vec::new(),
        }
    }

    /// Reject only the inputs at the given positions
    pub fn fields<I: IntoIterator<Item = usize>>(positions: I) -> Self {
        Self {
            message: None,
            field_errors: positions
                .into_iter()
                .map(|identity_field| FieldError {
                    identity_field,
                    message: None,
                })
                .collect(),
        }
    }
}

/// Validation, send, verify and token extraction for one identity type
#[async_trait]
pub trait VerificationChannel: Send + Sync {
    /// Whatever the backend returns from a successful verify
    type Response: Send;

    /// Check the identity format locally, before any network call
    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection>;

    /// Ask the backend to deliver a code to the identity
    async fn send_code(&self, identity: &str) -> Result<(), ChannelError>;

    /// Check a code for the identity
    async fn verify_code(&self, identity: &str, code: &str)
        -> Result<Self::Response, ChannelError>;

    /// Extract the proof token from a verify response
    fn token(&self, response: &Self::Response) -> String;
}
