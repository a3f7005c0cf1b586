//! Account creation over `/auth/signup`

use async_trait::async_trait;

use eq_core::services::signup::{SignupApi, SignupSubmission};
use eq_core::ChannelError;

use crate::http::dto::{SignupReceipt, SignupRequest, SignupResponse};
use crate::http::ApiClient;

const SIGNUP_PATH: &str = "/auth/signup";

pub struct HttpSignupApi {
    client: ApiClient,
}

impl HttpSignupApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SignupApi for HttpSignupApi {
    type Receipt = SignupReceipt;

    async fn register(&self, submission: &SignupSubmission) -> Result<SignupReceipt, ChannelError> {
        let request = SignupRequest::from(submission);
        let response: SignupResponse = self.client.post_json(SIGNUP_PATH, &request).await?;
        tracing::info!(
            user_id = %response.user_id,
            event = "account_created",
            "Account created"
        );
        Ok(response.into())
    }
}
