//! Signup form composing both verification flows with the nickname check
//! and password confirmation

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eq_shared::phone::{join_phone_parts, normalize_phone_number, PhonePart, PhoneParts};
use eq_shared::validation::{is_valid_nickname, is_valid_password};
use tracing;
use uuid::Uuid;

use crate::domain::entities::form_field::{FieldState, FormFields, FormValue};
use crate::errors::DomainResult;
use crate::services::verification::{
    BusyFlag, FlowConfig, SendOutcome, VerificationChannel, VerificationFlow, VerifyOutcome,
};

use super::config::{SignupMessages, SignupSettings};
use super::traits::{NicknameChecker, SignupApi};
use super::types::{NicknameOutcome, Requirement, SignupError, SignupSnapshot, SignupSubmission};

pub const EMAIL_FIELD: &str = "email";
pub const EMAIL_CODE_FIELD: &str = "emailCode";
pub const PHONE_FIELDS: [&str; 3] = ["phoneFirst", "phoneMiddle", "phoneLast"];
pub const SMS_CODE_FIELD: &str = "smsCode";
pub const NICKNAME_FIELD: &str = "nickname";
pub const PASSWORD_FIELD: &str = "password";
pub const PASSWORD_CONFIRM_FIELD: &str = "passwordConfirm";

/// The signup form: observed values, field statuses, and the flows and
/// checks that gate submission.
///
/// Both flows and the nickname check share one busy flag, so at most one
/// network action is outstanding across the form.
pub struct SignupForm<E, S, N>
where
    E: VerificationChannel + ?Sized,
    S: VerificationChannel + ?Sized,
    N: NicknameChecker + ?Sized,
{
    /// Owner id for form-level actions on the busy flag
    id: Uuid,
    email: FormValue,
    email_code: FormValue,
    phone_parts: [FormValue; 3],
    /// Joined phone parts, the identity of the SMS flow
    phone: FormValue,
    sms_code: FormValue,
    nickname: FormValue,
    password: FormValue,
    password_confirm: FormValue,
    fields: FormFields,
    busy: BusyFlag,
    email_flow: VerificationFlow<E>,
    sms_flow: VerificationFlow<S>,
    nickname_checker: Arc<N>,
    /// Nickname the last successful availability check was for
    checked_nickname: Mutex<Option<String>>,
    messages: SignupMessages,
}

impl<E, S, N> SignupForm<E, S, N>
where
    E: VerificationChannel + ?Sized,
    S: VerificationChannel + ?Sized,
    N: NicknameChecker + ?Sized,
{
    /// Create an empty form
    ///
    /// # Arguments
    ///
    /// * `email_channel` - Channel of the email flow
    /// * `sms_channel` - Channel of the SMS flow
    /// * `nickname_checker` - Nickname availability lookup
    /// * `settings` - Validity windows and texts
    pub fn new(
        email_channel: Arc<E>,
        sms_channel: Arc<S>,
        nickname_checker: Arc<N>,
        settings: SignupSettings,
    ) -> DomainResult<Self> {
        let fields = FormFields::new();
        let busy = BusyFlag::new();

        let email = FormValue::default();
        let email_code = FormValue::default();
        let phone = FormValue::default();
        let sms_code = FormValue::default();

        let email_flow = VerificationFlow::new(
            email_channel,
            FlowConfig::new(
                settings.email_ttl_seconds,
                [EMAIL_FIELD],
                EMAIL_CODE_FIELD,
                settings.email_messages,
            ),
            busy.clone(),
            fields.clone(),
            email.subscribe(),
            email_code.subscribe(),
        )?;

        let sms_flow = VerificationFlow::new(
            sms_channel,
            FlowConfig::new(
                settings.sms_ttl_seconds,
                PHONE_FIELDS,
                SMS_CODE_FIELD,
                settings.sms_messages,
            ),
            busy.clone(),
            fields.clone(),
            phone.subscribe(),
            sms_code.subscribe(),
        )?;

        Ok(Self {
            id: Uuid::new_v4(),
            email,
            email_code,
            phone_parts: Default::default(),
            phone,
            sms_code,
            nickname: FormValue::default(),
            password: FormValue::default(),
            password_confirm: FormValue::default(),
            fields,
            busy,
            email_flow,
            sms_flow,
            nickname_checker,
            checked_nickname: Mutex::new(None),
            messages: settings.form_messages,
        })
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    pub fn email_flow(&self) -> &VerificationFlow<E> {
        &self.email_flow
    }

    pub fn sms_flow(&self) -> &VerificationFlow<S> {
        &self.sms_flow
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.email.set(value);
        self.email_flow.refresh();
    }

    pub fn set_email_code(&self, value: impl Into<String>) {
        self.email_code.set(value);
    }

    /// Edit one phone sub-field; the SMS identity follows
    pub fn set_phone_part(&self, part: PhonePart, value: impl Into<String>) {
        self.phone_parts[part as usize].set(value);
        let [first, middle, last] = &self.phone_parts;
        self.phone
            .set(join_phone_parts(&first.get(), &middle.get(), &last.get()));
        self.sms_flow.refresh();
    }

    /// Fill all three phone sub-fields from a `-` separated number
    pub fn set_phone(&self, value: &str) {
        let parts = PhoneParts::split(value);
        for part in PhonePart::ALL {
            self.phone_parts[part as usize].set(parts.get(part));
        }
        self.phone.set(join_phone_parts(parts.first, parts.middle, parts.last));
        self.sms_flow.refresh();
    }

    pub fn set_sms_code(&self, value: impl Into<String>) {
        self.sms_code.set(value);
    }

    /// Edit the nickname; a different value needs a new availability check
    pub fn set_nickname(&self, value: impl Into<String>) {
        self.nickname.set(value);
        let current = self.nickname.get();
        let mut checked = self.lock_checked();
        if checked.as_deref().is_some_and(|nickname| nickname != current) {
            *checked = None;
            drop(checked);
            self.fields.clear(NICKNAME_FIELD);
        }
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.password.set(value);
        self.update_password_messages();
    }

    pub fn set_password_confirm(&self, value: impl Into<String>) {
        self.password_confirm.set(value);
        self.update_password_messages();
    }

    pub async fn on_send_email_code(&self) -> SendOutcome {
        self.email_flow.on_send_code().await
    }

    pub async fn on_verify_email_code(&self) -> VerifyOutcome {
        self.email_flow.on_verify_code().await
    }

    pub async fn on_send_sms_code(&self) -> SendOutcome {
        self.sms_flow.on_send_code().await
    }

    pub async fn on_verify_sms_code(&self) -> VerifyOutcome {
        self.sms_flow.on_verify_code().await
    }

    /// Check the current nickname against the local rules, then ask the
    /// backend whether it is free
    pub async fn on_check_nickname(&self) -> NicknameOutcome {
        let Some(_guard) = self.busy.try_acquire(self.id) else {
            tracing::debug!(
                form = %self.id,
                event = "nickname_check_skipped_busy",
                "Another action is in flight"
            );
            return NicknameOutcome::Busy;
        };

        let nickname = self.nickname.get();
        *self.lock_checked() = None;
        self.fields.clear(NICKNAME_FIELD);

        if !is_valid_nickname(&nickname) {
            self.fields
                .set_error(NICKNAME_FIELD, &self.messages.nickname_invalid);
            return NicknameOutcome::Invalid;
        }

        let result = self.nickname_checker.is_nickname_available(&nickname).await;

        if self.nickname.get() != nickname {
            tracing::info!(
                form = %self.id,
                event = "nickname_result_discarded",
                "Nickname changed while checking, result discarded"
            );
            return NicknameOutcome::Stale;
        }

        match result {
            Ok(true) => {
                *self.lock_checked() = Some(nickname.clone());
                self.fields
                    .set_success(NICKNAME_FIELD, &self.messages.nickname_available);
                tracing::info!(
                    form = %self.id,
                    nickname = %nickname,
                    event = "nickname_available",
                    "Nickname is available"
                );
                NicknameOutcome::Available
            }
            Ok(false) => {
                self.fields
                    .set_error(NICKNAME_FIELD, &self.messages.nickname_taken);
                tracing::info!(
                    form = %self.id,
                    nickname = %nickname,
                    event = "nickname_taken",
                    "Nickname is already taken"
                );
                NicknameOutcome::Taken
            }
            Err(error) => {
                let text = self.messages.nickname_errors.message_for(&error);
                self.fields.set_error(NICKNAME_FIELD, text);
                tracing::warn!(
                    form = %self.id,
                    status = ?error.status,
                    error = %error,
                    event = "nickname_check_failed",
                    "Failed to check nickname availability"
                );
                NicknameOutcome::Failed(error.kind())
            }
        }
    }

    /// Whether the last successful availability check was for the current
    /// nickname
    pub fn nickname_confirmed(&self) -> bool {
        let current = self.nickname.get();
        self.lock_checked().as_deref() == Some(current.as_str())
    }

    /// Indicator for the password input
    pub fn password_state(&self) -> FieldState {
        let password = self.password.get();
        if password.is_empty() {
            FieldState::Default
        } else if is_valid_password(&password) {
            FieldState::Success
        } else {
            FieldState::Error
        }
    }

    /// Indicator for the password confirmation input
    pub fn password_confirm_state(&self) -> FieldState {
        let confirm = self.password_confirm.get();
        if confirm.is_empty() {
            FieldState::Default
        } else if confirm == self.password.get() {
            FieldState::Success
        } else {
            FieldState::Error
        }
    }

    /// Conditions still blocking submission, in form order
    pub fn requirements(&self) -> Vec<Requirement> {
        let mut missing = Vec::new();
        if !self.email_flow.is_verified() {
            missing.push(Requirement::EmailVerified);
        }
        if !self.sms_flow.is_verified() {
            missing.push(Requirement::PhoneVerified);
        }
        if !self.nickname_confirmed() {
            missing.push(Requirement::NicknameChecked);
        }
        if self.password_state() != FieldState::Success {
            missing.push(Requirement::PasswordValid);
        }
        if self.password_confirm_state() != FieldState::Success {
            missing.push(Requirement::PasswordConfirmed);
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.requirements().is_empty() && !self.busy.is_busy()
    }

    /// Collect the submission, or the requirements still unmet
    pub fn submission(&self) -> Result<SignupSubmission, SignupError> {
        let missing = self.requirements();
        if !missing.is_empty() {
            return Err(SignupError::Incomplete(missing));
        }

        let (Some(email_token), Some(sms_token)) = (self.email_flow.token(), self.sms_flow.token())
        else {
            return Err(SignupError::Incomplete(vec![
                Requirement::EmailVerified,
                Requirement::PhoneVerified,
            ]));
        };

        Ok(SignupSubmission {
            email: self.email.get(),
            email_token,
            phone_number: normalize_phone_number(&self.phone.get()),
            sms_token,
            nickname: self.nickname.get(),
            password: self.password.get(),
        })
    }

    /// Submit the form through `api`
    pub async fn submit<A>(&self, api: &A) -> Result<A::Receipt, SignupError>
    where
        A: SignupApi + ?Sized,
    {
        let Some(_guard) = self.busy.try_acquire(self.id) else {
            return Err(SignupError::Busy);
        };

        let submission = self.submission()?;
        match api.register(&submission).await {
            Ok(receipt) => {
                tracing::info!(
                    form = %self.id,
                    nickname = %submission.nickname,
                    event = "signup_submitted",
                    "Signup accepted"
                );
                Ok(receipt)
            }
            Err(error) => {
                tracing::warn!(
                    form = %self.id,
                    status = ?error.status,
                    error = %error,
                    event = "signup_rejected",
                    "Signup rejected by the backend"
                );
                Err(SignupError::Rejected(error))
            }
        }
    }

    /// Read-only view of the whole form
    pub fn snapshot(&self) -> SignupSnapshot {
        let email = self.email_flow.snapshot();
        let sms = self.sms_flow.snapshot();
        let requirements = self.requirements();
        let can_submit = requirements.is_empty() && !self.busy.is_busy();

        SignupSnapshot {
            email,
            sms,
            nickname: self.nickname.get(),
            nickname_checked: self.nickname_confirmed(),
            password_state: self.password_state(),
            password_confirm_state: self.password_confirm_state(),
            fields: self.fields.snapshot(),
            requirements,
            can_submit,
        }
    }

    fn update_password_messages(&self) {
        match self.password_state() {
            FieldState::Error => self
                .fields
                .set_error(PASSWORD_FIELD, &self.messages.password_invalid),
            state => {
                self.fields.clear(PASSWORD_FIELD);
                self.fields.set_state(PASSWORD_FIELD, state);
            }
        }

        match self.password_confirm_state() {
            FieldState::Success => self
                .fields
                .set_success(PASSWORD_CONFIRM_FIELD, &self.messages.password_match),
            FieldState::Error => self
                .fields
                .set_error(PASSWORD_CONFIRM_FIELD, &self.messages.password_mismatch),
            FieldState::Default => self.fields.clear(PASSWORD_CONFIRM_FIELD),
        }
    }

    fn lock_checked(&self) -> MutexGuard<'_, Option<String>> {
        self.checked_nickname
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
