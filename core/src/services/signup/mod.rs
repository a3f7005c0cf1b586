//! Signup form orchestration
//!
//! Composes the email flow, the SMS flow, the nickname availability check and
//! the password confirmation into one submit decision.

pub mod config;
pub mod form;
pub mod traits;
pub mod types;


pub use config::{SignupMessages, SignupSettings};
pub use form::{
    SignupForm, EMAIL_CODE_FIELD, EMAIL_FIELD, NICKNAME_FIELD, PASSWORD_CONFIRM_FIELD,
    PASSWORD_FIELD, PHONE_FIELDS, SMS_CODE_FIELD,
};
pub use traits::{NicknameChecker, SignupApi};
pub use types::{NicknameOutcome, Requirement, SignupError, SignupSnapshot, SignupSubmission};
