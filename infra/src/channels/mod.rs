//! REST-backed channels for the signup form
//!
//! The identity checks here are shared with the mock backend's channels so
//! both reject exactly the same input before any call is made.

pub mod email;
pub mod nickname;
pub mod signup;
pub mod sms;


use eq_core::services::verification::IdentityRejection;
use eq_shared::email::is_valid_email;
use eq_shared::phone::PhoneParts;

pub use email::HttpEmailChannel;
pub use nickname::HttpNicknameChecker;
pub use signup::HttpSignupApi;
pub use sms::HttpSmsChannel;

/// Email identities are rejected as a whole
pub fn validate_email_identity(identity: &str) -> Result<(), IdentityRejection> {
    if is_valid_email(identity.trim()) {
        Ok(())
    } else {
        Err(IdentityRejection::broadcast())
    }
}

/// Phone identities are rejected per sub-field, in prefix / middle / last order
pub fn validate_phone_identity(identity: &str) -> Result<(), IdentityRejection> {
    let invalid = PhoneParts::split(identity).invalid_parts();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(IdentityRejection::fields(
            invalid.into_iter().map(|part| part as usize),
        ))
    }
}
