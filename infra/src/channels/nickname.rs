//! Nickname availability over `/users/nickname/check`

use async_trait::async_trait;

use eq_core::services::signup::NicknameChecker;
use eq_core::ChannelError;

use crate::http::dto::NicknameCheckResponse;
use crate::http::ApiClient;

const CHECK_PATH: &str = "/users/nickname/check";

pub struct HttpNicknameChecker {
    client: ApiClient,
}

impl HttpNicknameChecker {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NicknameChecker for HttpNicknameChecker {
    async fn is_nickname_available(&self, nickname: &str) -> Result<bool, ChannelError> {
        let response: NicknameCheckResponse = self
            .client
            .get_json(CHECK_PATH, &[("nickname", nickname)])
            .await?;
        Ok(response.is_available)
    }
}
