//! # EduQuiz Core
//!
//! Client-side domain layer for the EduQuiz signup form.
//! This crate contains the countdown timer, the form field registry, the
//! reusable send-code / verify-code flow controller, the signup form
//! orchestration, the modal stack and the error types they share.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
