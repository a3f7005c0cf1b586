//! Unit tests for wire formats

use serde_json::json;
use uuid::Uuid;

use eq_core::services::signup::SignupSubmission;

use crate::http::dto::{
    ErrorBody, NicknameCheckResponse, SendSmsCodeRequest, SignupReceipt, SignupRequest,
    SignupResponse, VerifyCodeResponse,
};

#[test]
fn test_requests_are_snake_case() {
    let request = SendSmsCodeRequest {
        phone_number: "010-1234-5678".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "phone_number": "010-1234-5678" })
    );
}

#[test]
fn test_signup_request_from_submission() {
    let submission = SignupSubmission {
        email: "a@example.com".to_string(),
        email_token: "et".to_string(),
        phone_number: "01012345678".to_string(),
        sms_token: "st".to_string(),
        nickname: "퀴즈왕".to_string(),
        password: "passw0rd!".to_string(),
    };

    let request = SignupRequest::from(&submission);
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "email": "a@example.com",
            "email_token": "et",
            "phone_number": "01012345678",
            "sms_token": "st",
            "nickname": "퀴즈왕",
            "password": "passw0rd!",
        })
    );
    assert!(!format!("{request:?}").contains("passw0rd!"));
}

#[test]
fn test_responses_decode() {
    let verify: VerifyCodeResponse =
        serde_json::from_value(json!({ "verification_token": "tok" })).unwrap();
    assert_eq!(verify.verification_token, "tok");

    let nickname: NicknameCheckResponse =
        serde_json::from_value(json!({ "is_available": false })).unwrap();
    assert!(!nickname.is_available);

    let error: ErrorBody = serde_json::from_value(json!({ "message": "nope" })).unwrap();
    assert_eq!(error.status, None);
    assert_eq!(error.error_code, None);
}

#[test]
fn test_receipt_is_camel_case() {
    let user_id = Uuid::new_v4();
    let response: SignupResponse = serde_json::from_value(json!({
        "user_id": user_id,
        "access_token": "jwt",
    }))
    .unwrap();

    let receipt = SignupReceipt::from(response);
    assert_eq!(
        serde_json::to_value(&receipt).unwrap(),
        json!({ "userId": user_id, "accessToken": "jwt" })
    );
}
