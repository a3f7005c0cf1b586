//! Configuration module
//!
//! - `backend` - REST backend location and timeouts
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Code validity windows

pub mod backend;
pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};

use crate::types::Language;

pub use backend::BackendConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Complete client configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Language of user-facing messages
    #[serde(default)]
    pub language: Language,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Verification timing
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            language: Language::default(),
            backend: BackendConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            language: Language::default(),
            backend: BackendConfig::new("https://api.eduquiz.kr/api/v1"),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Production => Self::production(),
            Environment::Development | Environment::Staging => {
                let mut config = Self::development();
                config.environment = env;
                config.logging = LoggingConfig::for_environment(env);
                config
            }
        };

        if std::env::var("API_BASE_URL").is_ok() || std::env::var("API_USE_MOCK").is_ok() {
            config.backend = BackendConfig::from_env();
        }
        if let Some(language) = std::env::var("APP_LANGUAGE")
            .ok()
            .and_then(|lang| lang.parse().ok())
        {
            config.language = language;
        }
        config
    }
}
