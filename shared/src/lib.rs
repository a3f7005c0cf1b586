//! Shared utilities and common types for the EduQuiz signup client
//!
//! This crate provides common functionality used across all client modules:
//! - Configuration types
//! - Identity, nickname and password validation
//! - Common type definitions

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, Environment, LogFormat, LoggingConfig, VerificationConfig,
};
pub use types::Language;
pub use utils::{email, phone, validation};
