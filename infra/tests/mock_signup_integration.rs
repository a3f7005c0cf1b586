//! End-to-end signup against the in-process mock backend through the same
//! trait objects the driver uses

use std::sync::Arc;

use eq_core::services::signup::{
    NicknameChecker, NicknameOutcome, SignupError, SignupForm, SignupSettings,
};
use eq_core::services::verification::{SendOutcome, VerifyOutcome};
use eq_core::ChannelErrorKind;
use eq_infra::mock::backend::IdentityKind;
use eq_infra::{
    connect, DynSignupApi, DynVerificationChannel, MockBackend, MockEmailChannel,
    MockNicknameChecker, MockSignupApi, MockSmsChannel,
};
use eq_shared::BackendConfig;

type DynForm = SignupForm<DynVerificationChannel, DynVerificationChannel, dyn NicknameChecker>;

struct Setup {
    backend: Arc<MockBackend>,
    form: DynForm,
    api: Arc<DynSignupApi>,
}

fn setup(backend: Arc<MockBackend>) -> Setup {
    let email: Arc<DynVerificationChannel> = Arc::new(MockEmailChannel::new(backend.clone()));
    let sms: Arc<DynVerificationChannel> = Arc::new(MockSmsChannel::new(backend.clone()));
    let nicknames: Arc<dyn NicknameChecker> = Arc::new(MockNicknameChecker::new(backend.clone()));
    let api: Arc<DynSignupApi> = Arc::new(MockSignupApi::new(backend.clone()));

    let form = SignupForm::new(email, sms, nicknames, SignupSettings::default()).unwrap();
    Setup { backend, form, api }
}

async fn verify_everything(setup: &Setup, email: &str, phone: &str, nickname: &str) {
    let form = &setup.form;

    form.set_email(email);
    assert_eq!(form.on_send_email_code().await, SendOutcome::Sent);
    form.set_email_code(setup.backend.issued_code(IdentityKind::Email, email).unwrap());
    assert_eq!(form.on_verify_email_code().await, VerifyOutcome::Verified);

    form.set_phone(phone);
    assert_eq!(form.on_send_sms_code().await, SendOutcome::Sent);
    form.set_sms_code(setup.backend.issued_code(IdentityKind::Phone, phone).unwrap());
    assert_eq!(form.on_verify_sms_code().await, VerifyOutcome::Verified);

    form.set_nickname(nickname);
    assert_eq!(form.on_check_nickname().await, NicknameOutcome::Available);

    form.set_password("passw0rd!");
    form.set_password_confirm("passw0rd!");
}

#[tokio::test]
async fn test_signup_through_mock_backend() {
    let setup = setup(Arc::new(MockBackend::new()));
    verify_everything(&setup, "student@example.com", "010-1234-5678", "퀴즈왕").await;
    assert!(setup.form.can_submit());

    let receipt = setup.form.submit(&*setup.api).await.unwrap();
    assert!(!receipt.access_token.is_empty());
}

#[tokio::test]
async fn test_second_signup_with_same_email_is_refused() {
    let backend = Arc::new(MockBackend::new());
    let first = setup(backend.clone());
    verify_everything(&first, "student@example.com", "010-1234-5678", "퀴즈왕").await;
    first.form.submit(&*first.api).await.unwrap();

    let second = setup(backend);
    second.form.set_email("student@example.com");
    assert_eq!(
        second.form.on_send_email_code().await,
        SendOutcome::Failed(ChannelErrorKind::Conflict)
    );
}

#[tokio::test]
async fn test_reserved_nickname_is_taken() {
    let setup = setup(Arc::new(MockBackend::new()));
    setup.form.set_nickname("admin");

    assert_eq!(setup.form.on_check_nickname().await, NicknameOutcome::Taken);
    assert!(matches!(
        setup.form.submit(&*setup.api).await,
        Err(SignupError::Incomplete(_))
    ));
}

#[tokio::test]
async fn test_connect_selects_backend() {
    let mut config = BackendConfig::default();
    config.use_mock = true;
    assert!(connect(&config).is_ok());

    let config = BackendConfig::new("http://localhost:8080/api/v1");
    let backend = connect(&config).unwrap();
    assert!(backend.email.validate_identity("student@example.com").is_ok());
    assert!(backend.sms.validate_identity("010-1234").is_err());
}
