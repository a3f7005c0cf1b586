//! Channels driving the mock backend

use std::sync::Arc;

use async_trait::async_trait;

use eq_core::services::signup::{NicknameChecker, SignupApi, SignupSubmission};
use eq_core::services::verification::{IdentityRejection, VerificationChannel};
use eq_core::ChannelError;

use super::backend::MockBackend;
use crate::channels::{validate_email_identity, validate_phone_identity};
use crate::http::dto::{SignupReceipt, VerifyCodeResponse};

pub struct MockEmailChannel {
    backend: Arc<MockBackend>,
}

impl MockEmailChannel {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl VerificationChannel for MockEmailChannel {
    type Response = VerifyCodeResponse;

    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection> {
        validate_email_identity(identity)
    }

    async fn send_code(&self, identity: &str) -> Result<(), ChannelError> {
        self.backend.send_email_code(identity)
    }

    async fn verify_code(
        &self,
        identity: &str,
        code: &str,
    ) -> Result<VerifyCodeResponse, ChannelError> {
        let verification_token = self.backend.verify_email_code(identity, code)?;
        Ok(VerifyCodeResponse { verification_token })
    }

    fn token(&self, response: &VerifyCodeResponse) -> String {
        response.verification_token.clone()
    }
}

pub struct MockSmsChannel {
    backend: Arc<MockBackend>,
}

impl MockSmsChannel {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl VerificationChannel for MockSmsChannel {
    type Response = VerifyCodeResponse;

    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection> {
        validate_phone_identity(identity)
    }

    async fn send_code(&self, identity: &str) -> Result<(), ChannelError> {
        self.backend.send_sms_code(identity)
    }

    async fn verify_code(
        &self,
        identity: &str,
        code: &str,
    ) -> Result<VerifyCodeResponse, ChannelError> {
        let verification_token = self.backend.verify_sms_code(identity, code)?;
        Ok(VerifyCodeResponse { verification_token })
    }

    fn token(&self, response: &VerifyCodeResponse) -> String {
        response.verification_token.clone()
    }
}

pub struct MockNicknameChecker {
    backend: Arc<MockBackend>,
}

impl MockNicknameChecker {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl NicknameChecker for MockNicknameChecker {
    async fn is_nickname_available(&self, nickname: &str) -> Result<bool, ChannelError> {
        self.backend.is_nickname_available(nickname)
    }
}

pub struct MockSignupApi {
    backend: Arc<MockBackend>,
}

impl MockSignupApi {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl SignupApi for MockSignupApi {
    type Receipt = SignupReceipt;

    async fn register(&self, submission: &SignupSubmission) -> Result<SignupReceipt, ChannelError> {
        self.backend.register(submission)
    }
}
