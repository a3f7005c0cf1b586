//! Message catalogue
//!
//! Texts are embedded at compile time from `i18n/messages.toml`; a file at
//! the same relative path in the working directory takes precedence so the
//! wording can be changed without a rebuild.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use eq_core::services::signup::{SignupMessages, SignupSettings};
use eq_core::FlowMessages;
use eq_shared::{Language, VerificationConfig};

/// Catalogue path checked before falling back to the embedded copy
pub const OVERRIDE_PATH: &str = "i18n/messages.toml";

const EMBEDDED: &str = include_str!("../../i18n/messages.toml");

#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("Failed to read message catalogue: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid message catalogue: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Texts of the shell itself, outside any form field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShellMessages {
    /// An action was skipped because another one is in flight
    pub busy: String,
    /// A result arrived for an input that has since been edited
    pub stale: String,
}

impl Default for ShellMessages {
    fn default() -> Self {
        Self {
            busy: "Another action is in progress.".to_string(),
            stale: "The input changed while waiting, result discarded.".to_string(),
        }
    }
}

/// Every text of the form in one language
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageMessages {
    pub email: FlowMessages,
    pub sms: FlowMessages,
    pub form: SignupMessages,
    pub shell: ShellMessages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalogue {
    en: LanguageMessages,
    ko: LanguageMessages,
}

impl Catalogue {
    /// Load the override file if it exists, otherwise the embedded catalogue
    pub fn load() -> Result<Self, I18nError> {
        let path = Path::new(OVERRIDE_PATH);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading message catalogue from file");
            let content = fs::read_to_string(path)?;
            return Self::parse(&content);
        }
        Self::embedded()
    }

    pub fn embedded() -> Result<Self, I18nError> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> Result<Self, I18nError> {
        Ok(toml::from_str(content)?)
    }

    pub fn messages(&self, language: Language) -> &LanguageMessages {
        match language {
            Language::English => &self.en,
            Language::Korean => &self.ko,
        }
    }

    /// Form settings with this catalogue's texts in `language`
    pub fn settings(&self, language: Language, verification: &VerificationConfig) -> SignupSettings {
        let messages = self.messages(language).clone();
        SignupSettings {
            email_messages: messages.email,
            sms_messages: messages.sms,
            form_messages: messages.form,
            ..SignupSettings::default()
        }
        .with_ttls(verification)
    }
}
