//! Traits for the non-verification calls a signup form makes

use async_trait::async_trait;

use crate::errors::ChannelError;

use super::types::SignupSubmission;

/// Nickname uniqueness lookup
#[async_trait]
pub trait NicknameChecker: Send + Sync {
    /// `Ok(true)` when nobody uses the nickname yet
    async fn is_nickname_available(&self, nickname: &str) -> Result<bool, ChannelError>;
}

/// Final account creation call
#[async_trait]
pub trait SignupApi: Send + Sync {
    /// Whatever the backend returns for a created account
    type Receipt: Send;

    async fn register(&self, submission: &SignupSubmission) -> Result<Self::Receipt, ChannelError>;
}
