//! Types for verification flow results and read-only views

use serde::Serialize;

use crate::domain::entities::countdown_timer::format_mm_ss;
use crate::domain::entities::form_field::FieldState;
use crate::errors::ChannelErrorKind;

/// Status of the last send or verify action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// What `on_send_code` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// First successful send since the flow was reset
    Sent,
    /// A later successful send
    Resent,
    /// Identity failed local validation; no network call was made
    InvalidIdentity,
    /// The backend rejected or the request failed
    Failed(ChannelErrorKind),
    /// Another action holds the busy flag; nothing was done
    Busy,
    /// The identity changed while the call was in flight; result discarded
    Stale,
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Sent | SendOutcome::Resent)
    }
}

/// What `on_verify_code` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code accepted and token stored
    Verified,
    /// Code input was empty; no network call was made
    CodeRequired,
    /// Validity window elapsed or never started; no network call was made
    Expired,
    /// The backend rejected the code or the request failed
    Rejected(ChannelErrorKind),
    /// Another action holds the busy flag; nothing was done
    Busy,
    /// The identity changed while the call was in flight; result discarded
    Stale,
}

/// Read-only view of a flow with the UI decisions derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub identity: String,
    pub code: String,
    pub token: Option<String>,
    pub verified: bool,
    pub code_sent: bool,
    pub send_status: ActionStatus,
    pub verify_status: ActionStatus,
    pub remaining_seconds: u64,
    pub identity_valid: bool,
    pub busy: bool,
}

impl FlowSnapshot {
    pub fn can_send(&self) -> bool {
        self.identity_valid && !self.busy && !self.verified
    }

    pub fn can_verify(&self) -> bool {
        self.code_sent && !self.code.trim().is_empty() && !self.busy && !self.verified
    }

    pub fn is_running(&self) -> bool {
        self.remaining_seconds > 0
    }

    pub fn formatted_remaining(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }

    /// Indicator for the identity inputs
    pub fn identity_field_state(&self) -> FieldState {
        if self.verified {
            FieldState::Success
        } else if self.send_status == ActionStatus::Error {
            FieldState::Error
        } else {
            FieldState::Default
        }
    }

    /// Indicator for the code input
    pub fn code_field_state(&self) -> FieldState {
        match self.verify_status {
            ActionStatus::Success if self.verified => FieldState::Success,
            ActionStatus::Error => FieldState::Error,
            _ => FieldState::Default,
        }
    }
}
