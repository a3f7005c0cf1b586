//! Types for signup form results and read-only views

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::form_field::{FieldState, FieldStatus};
use crate::errors::{ChannelError, ChannelErrorKind};
use crate::services::verification::FlowSnapshot;

/// A condition that must hold before the form can be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    EmailVerified,
    PhoneVerified,
    NicknameChecked,
    PasswordValid,
    PasswordConfirmed,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::EmailVerified => "email_verified",
            Requirement::PhoneVerified => "phone_verified",
            Requirement::NicknameChecked => "nickname_checked",
            Requirement::PasswordValid => "password_valid",
            Requirement::PasswordConfirmed => "password_confirmed",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `on_check_nickname` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicknameOutcome {
    Available,
    Taken,
    /// Nickname broke the local rules; no network call was made
    Invalid,
    Failed(ChannelErrorKind),
    Busy,
    /// The nickname changed while the lookup was in flight; result discarded
    Stale,
}

/// Everything the backend needs to create the account
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupSubmission {
    pub email: String,
    pub email_token: String,
    /// Digits only
    pub phone_number: String,
    pub sms_token: String,
    pub nickname: String,
    pub password: String,
}

impl fmt::Debug for SignupSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupSubmission")
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("nickname", &self.nickname)
            .field("password", &"***")
            .finish_non_exhaustive()
    }
}

/// Why a submission did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Signup form is incomplete: {}", format_requirements(.0))]
    Incomplete(Vec<Requirement>),

    #[error("Another action is in progress")]
    Busy,

    #[error("Signup rejected: {0}")]
    Rejected(ChannelError),
}

fn format_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(Requirement::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read-only view of the whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupSnapshot {
    pub email: FlowSnapshot,
    pub sms: FlowSnapshot,
    pub nickname: String,
    pub nickname_checked: bool,
    pub password_state: FieldState,
    pub password_confirm_state: FieldState,
    pub fields: BTreeMap<String, FieldStatus>,
    pub requirements: Vec<Requirement>,
    pub can_submit: bool,
}
