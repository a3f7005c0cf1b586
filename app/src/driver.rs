//! Drives a signup form from parsed commands and renders the results

use std::fmt::Write as _;
use std::sync::Arc;

use eq_core::domain::entities::countdown_timer::format_mm_ss;
use eq_core::domain::entities::form_field::{FieldState, FieldStatus};
use eq_core::errors::DomainResult;
use eq_core::services::signup::{
    NicknameChecker, NicknameOutcome, SignupError, SignupForm, SignupSettings, SignupSnapshot,
    EMAIL_CODE_FIELD, EMAIL_FIELD, NICKNAME_FIELD, PASSWORD_CONFIRM_FIELD, PASSWORD_FIELD,
    PHONE_FIELDS, SMS_CODE_FIELD,
};
use eq_core::services::verification::{FlowSnapshot, SendOutcome, VerifyOutcome};
use eq_infra::{Backend, DynSignupApi, DynVerificationChannel};

use crate::commands::{Channel, Command, HELP};
use crate::i18n::ShellMessages;

/// Form type the shell works with
pub type ShellForm = SignupForm<DynVerificationChannel, DynVerificationChannel, dyn NicknameChecker>;

/// What the shell does after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print the text (if any) and read the next command
    Continue(String),
    Quit,
}

pub struct Driver {
    form: ShellForm,
    signup: Arc<DynSignupApi>,
    messages: ShellMessages,
}

impl Driver {
    pub fn new(
        backend: Backend,
        settings: SignupSettings,
        messages: ShellMessages,
    ) -> DomainResult<Self> {
        let form = SignupForm::new(backend.email, backend.sms, backend.nicknames, settings)?;
        Ok(Self {
            form,
            signup: backend.signup,
            messages,
        })
    }

    pub fn form(&self) -> &ShellForm {
        &self.form
    }

    pub async fn execute(&self, command: Command) -> Step {
        let text = match command {
            Command::SetEmail(value) => {
                self.form.set_email(value);
                String::new()
            }
            Command::SetPhone(value) => {
                self.form.set_phone(&value);
                String::new()
            }
            Command::SetCode(Channel::Email, value) => {
                self.form.set_email_code(value);
                String::new()
            }
            Command::SetCode(Channel::Sms, value) => {
                self.form.set_sms_code(value);
                String::new()
            }
            Command::Send(channel) => {
                let outcome = match channel {
                    Channel::Email => self.form.on_send_email_code().await,
                    Channel::Sms => self.form.on_send_sms_code().await,
                };
                self.describe_send(channel, outcome)
            }
            Command::Verify(channel) => {
                let outcome = match channel {
                    Channel::Email => self.form.on_verify_email_code().await,
                    Channel::Sms => self.form.on_verify_sms_code().await,
                };
                self.describe_verify(channel, outcome)
            }
            Command::SetNickname(value) => {
                self.form.set_nickname(value);
                String::new()
            }
            Command::CheckNickname => {
                let outcome = self.form.on_check_nickname().await;
                self.describe_nickname(outcome)
            }
            Command::SetPassword(value) => {
                self.form.set_password(value);
                self.field_messages(&[PASSWORD_FIELD, PASSWORD_CONFIRM_FIELD])
            }
            Command::ConfirmPassword(value) => {
                self.form.set_password_confirm(value);
                self.field_messages(&[PASSWORD_CONFIRM_FIELD])
            }
            Command::Status => render_status(&self.form.snapshot()),
            Command::StatusJson => match serde_json::to_string_pretty(&self.form.snapshot()) {
                Ok(json) => json,
                Err(error) => format!("Failed to encode the form: {error}"),
            },
            Command::Submit => match self.form.submit(self.signup.as_ref()).await {
                Ok(receipt) => format!("Account created: {}", receipt.user_id),
                Err(SignupError::Busy) => self.messages.busy.clone(),
                Err(error) => error.to_string(),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Step::Quit,
        };
        Step::Continue(text)
    }

    fn describe_send(&self, channel: Channel, outcome: SendOutcome) -> String {
        match outcome {
            SendOutcome::Sent | SendOutcome::Resent => self.field_messages(&[code_field(channel)]),
            SendOutcome::InvalidIdentity | SendOutcome::Failed(_) => {
                self.field_messages(identity_fields(channel))
            }
            SendOutcome::Busy => self.messages.busy.clone(),
            SendOutcome::Stale => self.messages.stale.clone(),
        }
    }

    fn describe_verify(&self, channel: Channel, outcome: VerifyOutcome) -> String {
        match outcome {
            VerifyOutcome::Busy => self.messages.busy.clone(),
            VerifyOutcome::Stale => self.messages.stale.clone(),
            _ => self.field_messages(&[code_field(channel)]),
        }
    }

    fn describe_nickname(&self, outcome: NicknameOutcome) -> String {
        match outcome {
            NicknameOutcome::Busy => self.messages.busy.clone(),
            NicknameOutcome::Stale => self.messages.stale.clone(),
            _ => self.field_messages(&[NICKNAME_FIELD]),
        }
    }

    // Distinct messages of the given fields, one per line
    fn field_messages(&self, fields: &[&str]) -> String {
        let mut lines: Vec<String> = Vec::new();
        for field in fields {
            if let Some(message) = self.form.fields().message(field) {
                if !lines.contains(&message) {
                    lines.push(message);
                }
            }
        }
        lines.join("\n")
    }
}

fn code_field(channel: Channel) -> &'static str {
    match channel {
        Channel::Email => EMAIL_CODE_FIELD,
        Channel::Sms => SMS_CODE_FIELD,
    }
}

fn identity_fields(channel: Channel) -> &'static [&'static str] {
    match channel {
        Channel::Email => &[EMAIL_FIELD],
        Channel::Sms => &PHONE_FIELDS,
    }
}

/// Multi-line overview of the form
pub fn render_status(snapshot: &SignupSnapshot) -> String {
    let mut out = String::new();
    render_flow(&mut out, "email", &snapshot.email);
    render_flow(&mut out, "phone", &snapshot.sms);

    let nickname = if snapshot.nickname.is_empty() {
        "-"
    } else {
        snapshot.nickname.as_str()
    };
    let checked = if snapshot.nickname_checked { "checked" } else { "unchecked" };
    let _ = writeln!(out, "nickname  {nickname} [{checked}]");
    let _ = writeln!(out, "password  [{}]", state_label(snapshot.password_state));
    let _ = writeln!(out, "confirm   [{}]", state_label(snapshot.password_confirm_state));

    for (field, status) in &snapshot.fields {
        if let FieldStatus {
            message: Some(message),
            state,
        } = status
        {
            let _ = writeln!(out, "  {field}: {message} ({})", state_label(*state));
        }
    }

    if snapshot.can_submit {
        out.push_str("ready to submit");
    } else {
        let missing: Vec<&str> = snapshot.requirements.iter().map(|r| r.as_str()).collect();
        if missing.is_empty() {
            out.push_str("waiting for the current action");
        } else {
            let _ = write!(out, "missing: {}", missing.join(", "));
        }
    }
    out
}

fn render_flow(out: &mut String, label: &str, flow: &FlowSnapshot) {
    let identity = if flow.identity.is_empty() {
        "-"
    } else {
        flow.identity.as_str()
    };
    let progress = if flow.verified {
        "verified".to_string()
    } else if flow.remaining_seconds > 0 {
        format!("code sent, {} left", format_mm_ss(flow.remaining_seconds))
    } else if flow.code_sent {
        "code expired".to_string()
    } else {
        "not verified".to_string()
    };
    let _ = writeln!(out, "{label:<9} {identity} [{progress}]");
}

fn state_label(state: FieldState) -> &'static str {
    match state {
        FieldState::Default => "-",
        FieldState::Error => "error",
        FieldState::Success => "ok",
    }
}
