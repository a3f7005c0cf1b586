//! Mock implementations for testing verification flows

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use eq_shared::phone::PhoneParts;

use crate::domain::entities::form_field::{FormFields, FormValue};
use crate::errors::ChannelError;
use crate::services::verification::{
    BusyFlag, FlowConfig, FlowMessages, IdentityRejection, VerificationChannel, VerificationFlow,
};

pub const EMAIL_FIELD: &str = "email";
pub const EMAIL_CODE_FIELD: &str = "emailCode";
pub const PHONE_FIELDS: [&str; 3] = ["phoneFirst", "phoneMiddle", "phoneLast"];
pub const SMS_CODE_FIELD: &str = "smsCode";

#[derive(Debug, Clone, Copy)]
pub enum IdentityFormat {
    Email,
    Phone,
}

#[derive(Debug, Clone)]
pub struct MockVerifyResponse {
    pub token: String,
}

// Mock channel recording every network call
pub struct MockChannel {
    pub format: IdentityFormat,
    pub send_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub send_error: Mutex<Option<ChannelError>>,
    pub verify_result: Mutex<Result<String, ChannelError>>,
    pub gate: Option<Arc<Notify>>,
}

impl MockChannel {
    pub fn new(format: IdentityFormat) -> Self {
        Self {
            format,
            send_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            send_error: Mutex::new(None),
            verify_result: Mutex::new(Ok("tok-abc".to_string())),
            gate: None,
        }
    }

    /// Calls block until the returned notify is triggered
    pub fn gated(format: IdentityFormat) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut channel = Self::new(format);
        channel.gate = Some(gate.clone());
        (channel, gate)
    }

    pub fn fail_sends_with(&self, error: ChannelError) {
        *self.send_error.lock().unwrap() = Some(error);
    }

    pub fn fail_verifies_with(&self, error: ChannelError) {
        *self.verify_result.lock().unwrap() = Err(error);
    }

    pub fn sends(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn verifies(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl VerificationChannel for MockChannel {
    type Response = MockVerifyResponse;

    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection> {
        match self.format {
            IdentityFormat::Email => {
                if eq_shared::email::is_valid_email(identity) {
                    Ok(())
                } else {
                    Err(IdentityRejection::broadcast())
                }
            }
            IdentityFormat::Phone => {
                let parts = PhoneParts::split(identity);
                let invalid = parts.invalid_parts();
                if invalid.is_empty() {
                    Ok(())
                } else {
                    Err(IdentityRejection::fields(
                        invalid.into_iter().map(|part| part as usize),
                    ))
                }
            }
        }
    }

    async fn send_code(&self, _identity: &str) -> Result<(), ChannelError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        match self.send_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn verify_code(
        &self,
        _identity: &str,
        _code: &str,
    ) -> Result<MockVerifyResponse, ChannelError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.verify_result
            .lock()
            .unwrap()
            .clone()
            .map(|token| MockVerifyResponse { token })
    }

    fn token(&self, response: &MockVerifyResponse) -> String {
        response.token.clone()
    }
}

// A flow plus the form pieces it observes
pub struct Harness {
    pub identity: FormValue,
    pub code: FormValue,
    pub fields: FormFields,
    pub busy: BusyFlag,
    pub channel: Arc<MockChannel>,
    pub flow: Arc<VerificationFlow<MockChannel>>,
}

impl Harness {
    pub fn email(ttl_seconds: u64) -> Self {
        Self::build(
            MockChannel::new(IdentityFormat::Email),
            ttl_seconds,
            BusyFlag::new(),
            FormFields::new(),
        )
    }

    pub fn build(
        channel: MockChannel,
        ttl_seconds: u64,
        busy: BusyFlag,
        fields: FormFields,
    ) -> Self {
        let config = match channel.format {
            IdentityFormat::Email => FlowConfig::new(
                ttl_seconds,
                [EMAIL_FIELD],
                EMAIL_CODE_FIELD,
                FlowMessages::default(),
            ),
            IdentityFormat::Phone => FlowConfig::new(
                ttl_seconds,
                PHONE_FIELDS,
                SMS_CODE_FIELD,
                FlowMessages::default(),
            ),
        };
        let identity = FormValue::default();
        let code = FormValue::default();
        let channel = Arc::new(channel);
        let flow = VerificationFlow::new(
            channel.clone(),
            config,
            busy.clone(),
            fields.clone(),
            identity.subscribe(),
            code.subscribe(),
        )
        .expect("valid flow config");

        Self {
            identity,
            code,
            fields,
            busy,
            channel,
            flow: Arc::new(flow),
        }
    }
}
