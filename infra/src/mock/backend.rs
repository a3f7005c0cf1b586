//! Mock backend state: issued codes, verification tokens and registrations

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use eq_core::services::signup::SignupSubmission;
use eq_core::ChannelError;
use eq_shared::email::{is_valid_email, mask_email};
use eq_shared::phone::{is_valid_mobile, mask_phone_number, normalize_phone_number};
use eq_shared::validation::is_valid_nickname;

use crate::http::dto::SignupReceipt;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Maximum number of wrong codes before the code is discarded
pub const MAX_ATTEMPTS: u32 = 5;

/// Nicknames the mock backend treats as taken from the start
pub const RESERVED_NICKNAMES: [&str; 3] = ["admin", "eduquiz", "운영자"];

/// Which kind of identity a code or token was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IdentityKey {
    kind: IdentityKind,
    value: String,
}

impl IdentityKey {
    fn email(email: &str) -> Self {
        Self {
            kind: IdentityKind::Email,
            value: email.trim().to_lowercase(),
        }
    }

    fn phone(phone: &str) -> Self {
        Self {
            kind: IdentityKind::Phone,
            value: normalize_phone_number(phone),
        }
    }

    fn masked(&self) -> String {
        match self.kind {
            IdentityKind::Email => mask_email(&self.value),
            IdentityKind::Phone => mask_phone_number(&self.value),
        }
    }
}

#[derive(Debug, Clone)]
struct IssuedCode {
    code: String,
    expires_at: DateTime<Utc>,
    attempts: u32,
}

impl IssuedCode {
    fn new(ttl: Duration) -> Self {
        Self {
            code: generate_code(),
            expires_at: Utc::now() + ttl,
            attempts: 0,
        }
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

// Uniform 6-digit code
fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    let code: u32 = rng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = CODE_LENGTH)
}

#[derive(Debug, Default)]
struct BackendState {
    codes: HashMap<IdentityKey, IssuedCode>,
    tokens: HashMap<String, IdentityKey>,
    registered: HashSet<IdentityKey>,
    nicknames: HashSet<String>,
}

/// Development stand-in for the REST backend.
///
/// Behaves like the real endpoints as far as the client can tell: malformed
/// identities get 400, registered ones 409, codes expire and run out of
/// attempts, and signup consumes the verification tokens.
#[derive(Debug)]
pub struct MockBackend {
    code_ttl: Duration,
    state: Mutex<BackendState>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_code_ttl(Duration::minutes(DEFAULT_EXPIRATION_MINUTES))
    }

    /// Backend whose codes stay valid for `code_ttl`
    pub fn with_code_ttl(code_ttl: Duration) -> Self {
        let state = BackendState {
            nicknames: RESERVED_NICKNAMES.iter().map(|n| n.to_string()).collect(),
            ..BackendState::default()
        };
        Self {
            code_ttl,
            state: Mutex::new(state),
        }
    }

    pub fn send_email_code(&self, email: &str) -> Result<(), ChannelError> {
        if !is_valid_email(email.trim()) {
            return Err(ChannelError::bad_format("Invalid email address"));
        }
        self.issue(IdentityKey::email(email))
    }

    pub fn verify_email_code(&self, email: &str, code: &str) -> Result<String, ChannelError> {
        self.verify(IdentityKey::email(email), code)
    }

    pub fn send_sms_code(&self, phone: &str) -> Result<(), ChannelError> {
        if !is_valid_mobile(phone) {
            return Err(ChannelError::bad_format("Invalid phone number"));
        }
        self.issue(IdentityKey::phone(phone))
    }

    pub fn verify_sms_code(&self, phone: &str, code: &str) -> Result<String, ChannelError> {
        self.verify(IdentityKey::phone(phone), code)
    }

    /// Code currently issued for an identity, if any
    pub fn issued_code(&self, kind: IdentityKind, identity: &str) -> Option<String> {
        let key = match kind {
            IdentityKind::Email => IdentityKey::email(identity),
            IdentityKind::Phone => IdentityKey::phone(identity),
        };
        self.lock().codes.get(&key).map(|issued| issued.code.clone())
    }

    pub fn is_nickname_available(&self, nickname: &str) -> Result<bool, ChannelError> {
        if !is_valid_nickname(nickname) {
            return Err(ChannelError::bad_format("Invalid nickname"));
        }
        Ok(!self.lock().nicknames.contains(nickname))
    }

    /// Create the account, consuming both verification tokens
    pub fn register(&self, submission: &SignupSubmission) -> Result<SignupReceipt, ChannelError> {
        let email = IdentityKey::email(&submission.email);
        let phone = IdentityKey::phone(&submission.phone_number);

        let mut state = self.lock();
        if state.tokens.get(&submission.email_token) != Some(&email)
            || state.tokens.get(&submission.sms_token) != Some(&phone)
        {
            return Err(ChannelError::bad_format("Invalid verification token"));
        }
        if state.registered.contains(&email) || state.registered.contains(&phone) {
            return Err(ChannelError::conflict("Already registered"));
        }
        if state.nicknames.contains(&submission.nickname) {
            return Err(ChannelError::conflict("Nickname already taken"));
        }

        state.tokens.remove(&submission.email_token);
        state.tokens.remove(&submission.sms_token);
        state.registered.insert(email.clone());
        state.registered.insert(phone);
        state.nicknames.insert(submission.nickname.clone());

        let receipt = SignupReceipt {
            user_id: Uuid::new_v4(),
            access_token: Uuid::new_v4().simple().to_string(),
        };
        tracing::info!(
            user_id = %receipt.user_id,
            email = %email.masked(),
            event = "mock_account_created",
            "Mock backend created an account"
        );
        Ok(receipt)
    }

    fn issue(&self, key: IdentityKey) -> Result<(), ChannelError> {
        let mut state = self.lock();
        if state.registered.contains(&key) {
            return Err(ChannelError::conflict("Already registered"));
        }

        let issued = IssuedCode::new(self.code_ttl);
        // Stands in for the email / SMS delivery
        tracing::info!(
            identity = %key.masked(),
            code = %issued.code,
            expires_at = %issued.expires_at,
            event = "mock_code_issued",
            "Mock backend issued a verification code"
        );
        state.codes.insert(key, issued);
        Ok(())
    }

    fn verify(&self, key: IdentityKey, code: &str) -> Result<String, ChannelError> {
        let mut state = self.lock();
        let Some(issued) = state.codes.get_mut(&key) else {
            return Err(ChannelError::bad_format("No verification code requested"));
        };

        if issued.is_expired() {
            state.codes.remove(&key);
            return Err(ChannelError::bad_format("Verification code expired"));
        }

        if issued.code != code.trim() {
            issued.attempts += 1;
            let attempts = issued.attempts;
            if attempts >= MAX_ATTEMPTS {
                state.codes.remove(&key);
            }
            tracing::warn!(
                identity = %key.masked(),
                attempts,
                event = "mock_code_mismatch",
                "Mock backend rejected a verification code"
            );
            return Err(ChannelError::bad_format("Verification code does not match"));
        }

        state.codes.remove(&key);
        let token = Uuid::new_v4().to_string();
        state.tokens.insert(token.clone(), key);
        Ok(token)
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
