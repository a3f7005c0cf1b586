//! Configuration for a signup form

use serde::{Deserialize, Serialize};

use eq_shared::config::verification::{DEFAULT_EMAIL_TTL_SECONDS, DEFAULT_SMS_TTL_SECONDS};
use eq_shared::VerificationConfig;

use crate::errors::StatusMessages;
use crate::services::verification::FlowMessages;

/// Texts for the nickname and password inputs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignupMessages {
    pub nickname_invalid: String,
    pub nickname_available: String,
    pub nickname_taken: String,
    /// Failed availability lookups by status
    pub nickname_errors: StatusMessages,
    pub password_invalid: String,
    pub password_mismatch: String,
    pub password_match: String,
}

impl Default for SignupMessages {
    fn default() -> Self {
        Self {
            nickname_invalid: "Use 2-10 characters: Hangul, letters or digits.".to_string(),
            nickname_available: "This nickname is available.".to_string(),
            nickname_taken: "This nickname is already taken.".to_string(),
            nickname_errors: StatusMessages::new(
                "Use 2-10 characters: Hangul, letters or digits.",
                "This nickname is already taken.",
                "Could not check the nickname. Please try again later.",
            ),
            password_invalid:
                "Use 8-20 characters with at least one letter, digit and special character."
                    .to_string(),
            password_mismatch: "Passwords do not match.".to_string(),
            password_match: "Passwords match.".to_string(),
        }
    }
}

/// Everything a signup form is built from besides its channels
#[derive(Debug, Clone)]
pub struct SignupSettings {
    pub email_ttl_seconds: u64,
    pub sms_ttl_seconds: u64,
    pub email_messages: FlowMessages,
    pub sms_messages: FlowMessages,
    pub form_messages: SignupMessages,
}

impl Default for SignupSettings {
    fn default() -> Self {
        Self {
            email_ttl_seconds: DEFAULT_EMAIL_TTL_SECONDS,
            sms_ttl_seconds: DEFAULT_SMS_TTL_SECONDS,
            email_messages: FlowMessages::default(),
            sms_messages: FlowMessages::default(),
            form_messages: SignupMessages::default(),
        }
    }
}

impl SignupSettings {
    /// Take the validity windows from the shared configuration
    pub fn with_ttls(mut self, verification: &VerificationConfig) -> Self {
        self.email_ttl_seconds = verification.email_ttl_seconds;
        self.sms_ttl_seconds = verification.sms_ttl_seconds;
        self
    }
}
