//! Validity windows for verification codes

use serde::{Deserialize, Serialize};

/// Default validity window of an email code (5 minutes)
pub const DEFAULT_EMAIL_TTL_SECONDS: u64 = 300;

/// Default validity window of an SMS code (3 minutes)
pub const DEFAULT_SMS_TTL_SECONDS: u64 = 180;

/// Verification timing configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds an emailed code stays verifiable
    #[serde(default = "default_email_ttl")]
    pub email_ttl_seconds: u64,

    /// Seconds an SMS code stays verifiable
    #[serde(default = "default_sms_ttl")]
    pub sms_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            email_ttl_seconds: DEFAULT_EMAIL_TTL_SECONDS,
            sms_ttl_seconds: DEFAULT_SMS_TTL_SECONDS,
        }
    }
}

fn default_email_ttl() -> u64 {
    DEFAULT_EMAIL_TTL_SECONDS
}

fn default_sms_ttl() -> u64 {
    DEFAULT_SMS_TTL_SECONDS
}
