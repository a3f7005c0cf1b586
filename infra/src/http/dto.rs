//! Wire DTOs for the signup endpoints.
//!
//! Requests and responses use snake_case like the backend; view models handed
//! back to callers serialize as camelCase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eq_core::services::signup::SignupSubmission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailCodeRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyEmailCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendSmsCodeRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySmsCodeRequest {
    pub phone_number: String,
    pub code: String,
}

/// Successful verify answer of either channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verification_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameCheckResponse {
    pub is_available: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub email_token: String,
    pub phone_number: String,
    pub sms_token: String,
    pub nickname: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("nickname", &self.nickname)
            .finish_non_exhaustive()
    }
}

impl From<&SignupSubmission> for SignupRequest {
    fn from(submission: &SignupSubmission) -> Self {
        Self {
            email: submission.email.clone(),
            email_token: submission.email_token.clone(),
            phone_number: submission.phone_number.clone(),
            sms_token: submission.sms_token.clone(),
            nickname: submission.nickname.clone(),
            password: submission.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub access_token: String,
}

/// Created account as returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupReceipt {
    pub user_id: Uuid,
    pub access_token: String,
}

impl From<SignupResponse> for SignupReceipt {
    fn from(response: SignupResponse) -> Self {
        Self {
            user_id: response.user_id,
            access_token: response.access_token,
        }
    }
}

/// Error body the backend sends with non-2xx statuses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
}
