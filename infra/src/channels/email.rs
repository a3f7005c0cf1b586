//! Email verification over `/auth/email/*`

use async_trait::async_trait;

use eq_core::services::verification::{IdentityRejection, VerificationChannel};
use eq_core::ChannelError;

use crate::http::dto::{SendEmailCodeRequest, VerifyCodeResponse, VerifyEmailCodeRequest};
use crate::http::ApiClient;

const SEND_PATH: &str = "/auth/email/send";
const VERIFY_PATH: &str = "/auth/email/verify";

pub struct HttpEmailChannel {
    client: ApiClient,
}

impl HttpEmailChannel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VerificationChannel for HttpEmailChannel {
    type Response = VerifyCodeResponse;

    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection> {
        super::validate_email_identity(identity)
    }

    async fn send_code(&self, identity: &str) -> Result<(), ChannelError> {
        let request = SendEmailCodeRequest {
            email: identity.trim().to_string(),
        };
        self.client
            .post_unit(SEND_PATH, &request)
            .await
            .map_err(ChannelError::from)
    }

    async fn verify_code(
        &self,
        identity: &str,
        code: &str,
    ) -> Result<VerifyCodeResponse, ChannelError> {
        let request = VerifyEmailCodeRequest {
            email: identity.trim().to_string(),
            code: code.trim().to_string(),
        };
        self.client
            .post_json(VERIFY_PATH, &request)
            .await
            .map_err(ChannelError::from)
    }

    fn token(&self, response: &VerifyCodeResponse) -> String {
        response.verification_token.clone()
    }
}
