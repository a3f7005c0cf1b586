//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer of the EduQuiz signup
//! client. It provides the concrete channels the core verification flows and
//! signup form are driven through.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **HTTP**: `ApiClient` over reqwest, snake_case wire DTOs
//! - **Channels**: email and SMS verification channels, nickname checker and
//!   signup API backed by the REST endpoints
//! - **Mock**: an in-process backend for development that issues codes
//!   locally and logs them

use std::sync::Arc;

use eq_core::services::signup::{NicknameChecker, SignupApi};
use eq_core::services::verification::VerificationChannel;
use eq_shared::BackendConfig;

// Re-export core types for convenience
pub use eq_core::errors::*;

/// HTTP client and wire formats
pub mod http;

/// REST-backed channels
pub mod channels;

/// In-process backend for development
pub mod mock;

pub use channels::{HttpEmailChannel, HttpNicknameChecker, HttpSignupApi, HttpSmsChannel};
pub use http::dto::{SignupReceipt, VerifyCodeResponse};
pub use http::ApiClient;
pub use mock::{MockBackend, MockEmailChannel, MockNicknameChecker, MockSignupApi, MockSmsChannel};

/// Verification channel as the driver holds it
pub type DynVerificationChannel = dyn VerificationChannel<Response = VerifyCodeResponse>;

/// Signup API as the driver holds it
pub type DynSignupApi = dyn SignupApi<Receipt = SignupReceipt>;

/// Every channel a signup form needs, behind trait objects
#[derive(Clone)]
pub struct Backend {
    pub email: Arc<DynVerificationChannel>,
    pub sms: Arc<DynVerificationChannel>,
    pub nicknames: Arc<dyn NicknameChecker>,
    pub signup: Arc<DynSignupApi>,
}

/// Build the channels for the configured backend
///
/// Returns the in-process mock when `use_mock` is set, otherwise REST
/// channels sharing one `ApiClient`.
pub fn connect(config: &BackendConfig) -> Result<Backend, InfrastructureError> {
    if config.use_mock {
        tracing::info!(event = "backend_selected", backend = "mock", "Using in-process mock backend");
        let backend = Arc::new(MockBackend::new());
        return Ok(Backend {
            email: Arc::new(MockEmailChannel::new(backend.clone())),
            sms: Arc::new(MockSmsChannel::new(backend.clone())),
            nicknames: Arc::new(MockNicknameChecker::new(backend.clone())),
            signup: Arc::new(MockSignupApi::new(backend)),
        });
    }

    let client = ApiClient::new(config)?;
    tracing::info!(
        event = "backend_selected",
        backend = "http",
        base_url = %config.base_url,
        "Using REST backend"
    );
    Ok(Backend {
        email: Arc::new(HttpEmailChannel::new(client.clone())),
        sms: Arc::new(HttpSmsChannel::new(client.clone())),
        nicknames: Arc::new(HttpNicknameChecker::new(client.clone())),
        signup: Arc::new(HttpSignupApi::new(client)),
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for ChannelError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Api { status, message } => ChannelError::new(status, message),
            InfrastructureError::Http(e) => match e.status() {
                Some(status) => ChannelError::new(status.as_u16(), e.to_string()),
                None => ChannelError::transport(e.to_string()),
            },
            other => ChannelError::transport(other.to_string()),
        }
    }
}
