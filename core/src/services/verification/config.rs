//! Configuration for a verification flow

use serde::{Deserialize, Serialize};

use crate::domain::entities::countdown_timer::format_mm_ss;
use crate::errors::{DomainError, DomainResult, StatusMessages};

/// Placeholder replaced by the validity window in `sent`/`resent` texts
pub const TTL_PLACEHOLDER: &str = "{ttl}";

/// Text templates shown by one flow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlowMessages {
    /// First successful send since the flow was reset
    pub sent: String,
    /// Every later successful send
    pub resent: String,
    /// Identity failed local validation
    pub identity_invalid: String,
    /// Verify attempted with an empty code
    pub code_required: String,
    /// Verify attempted after the window elapsed
    pub expired: String,
    /// Verify succeeded
    pub verified: String,
    /// Failed send calls by status
    pub send_errors: StatusMessages,
    /// Failed verify calls by status
    pub verify_errors: StatusMessages,
}

impl Default for FlowMessages {
    fn default() -> Self {
        Self {
            sent: "A verification code has been sent. It is valid for {ttl}.".to_string(),
            resent: "A new verification code has been sent. It is valid for {ttl}.".to_string(),
            identity_invalid: "Please check the format.".to_string(),
            code_required: "Please enter the verification code.".to_string(),
            expired: "The verification code has expired. Please request a new one.".to_string(),
            verified: "Verification complete.".to_string(),
            send_errors: StatusMessages::new(
                "Please check the format.",
                "This is already registered.",
                "Failed to send the code. Please try again later.",
            ),
            verify_errors: StatusMessages::new(
                "The verification code does not match.",
                "This is already registered.",
                "Verification failed. Please try again later.",
            ),
        }
    }
}

impl FlowMessages {
    /// Text for a successful send with the window filled in
    pub fn sent_text(&self, resent: bool, ttl_seconds: u64) -> String {
        let template = if resent { &self.resent } else { &self.sent };
        template.replace(TTL_PLACEHOLDER, &format_mm_ss(ttl_seconds))
    }
}

/// Configuration for a verification flow
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Seconds a sent code stays verifiable
    pub ttl_seconds: u64,
    /// Inputs the identity is typed into, in order (one for email, three for phone)
    pub identity_fields: Vec<String>,
    /// Input the code is typed into
    pub code_field: String,
    /// Texts shown on those inputs
    pub messages: FlowMessages,
}

impl FlowConfig {
    pub fn new<I, S>(
        ttl_seconds: u64,
        identity_fields: I,
        code_field: impl Into<String>,
        messages: FlowMessages,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ttl_seconds,
            identity_fields: identity_fields.into_iter().map(Into::into).collect(),
            code_field: code_field.into(),
            messages,
        }
    }

    /// Reject configurations a flow cannot run with
    pub fn validate(&self) -> DomainResult<()> {
        if self.ttl_seconds == 0 {
            return Err(DomainError::Validation {
                message: "ttl_seconds must be greater than zero".to_string(),
            });
        }
        if self.identity_fields.is_empty() {
            return Err(DomainError::Validation {
                message: "at least one identity field is required".to_string(),
            });
        }
        if self.code_field.is_empty() || self.identity_fields.contains(&self.code_field) {
            return Err(DomainError::Validation {
                message: format!("invalid code field '{}'", self.code_field),
            });
        }
        Ok(())
    }
}
