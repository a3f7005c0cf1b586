//! SMS verification over `/auth/sms/*`

use async_trait::async_trait;

use eq_core::services::verification::{IdentityRejection, VerificationChannel};
use eq_core::ChannelError;
use eq_shared::phone::normalize_phone_number;

use crate::http::dto::{SendSmsCodeRequest, VerifyCodeResponse, VerifySmsCodeRequest};
use crate::http::ApiClient;

const SEND_PATH: &str = "/auth/sms/send";
const VERIFY_PATH: &str = "/auth/sms/verify";

/// Sends phone numbers digits only (`01012345678`)
pub struct HttpSmsChannel {
    client: ApiClient,
}

impl HttpSmsChannel {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VerificationChannel for HttpSmsChannel {
    type Response = VerifyCodeResponse;

    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection> {
        super::validate_phone_identity(identity)
    }

    async fn send_code(&self, identity: &str) -> Result<(), ChannelError> {
        let request = SendSmsCodeRequest {
            phone_number: normalize_phone_number(identity),
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
        let request = VerifySmsCodeRequest {
            phone_number: normalize_phone_number(identity),
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
