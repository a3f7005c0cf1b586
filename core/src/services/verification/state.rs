//! Plain state of one verification flow and its transitions.
//!
//! No timer or I/O lives here; the flow service pairs these transitions with
//! the countdown timer and the channel calls. `verified` is derived from the
//! token, so a token exists exactly when the flow is verified.

use super::types::{ActionStatus, SendOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowState {
    identity: String,
    token: Option<String>,
    code_sent: bool,
    send_status: ActionStatus,
    verify_status: ActionStatus,
    successful_sends: u32,
    /// Bumped on every reset
    epoch: u64,
}

impl FlowState {
    /// Fresh state bound to an identity
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.token.is_some()
    }

    pub fn code_sent(&self) -> bool {
        self.code_sent
    }

    pub fn send_status(&self) -> ActionStatus {
        self.send_status
    }

    pub fn verify_status(&self) -> ActionStatus {
        self.verify_status
    }

    pub fn successful_sends(&self) -> u32 {
        self.successful_sends
    }

    /// Number of resets so far. An action that sees a different epoch after
    /// its network call was issued for an identity that no longer applies.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Bind to `identity`, resetting everything if it differs from the
    /// bound one or if the observed value was `mutated` in between.
    ///
    /// Returns `true` when a reset happened.
    pub fn rebind(&mut self, identity: &str, mutated: bool) -> bool {
        if !mutated && self.identity == identity {
            return false;
        }
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::new(identity)
        };
        true
    }

    /// Forget any verification; the verify status goes back to idle
    pub fn unverify(&mut self) {
        self.token = None;
        self.verify_status = ActionStatus::Idle;
    }

    /// Identity failed local validation
    pub fn record_send_rejected(&mut self) {
        self.send_status = ActionStatus::Error;
        self.code_sent = false;
    }

    /// The backend accepted a send; reports whether it was the first one
    pub fn record_send_success(&mut self) -> SendOutcome {
        let outcome = if self.successful_sends == 0 {
            SendOutcome::Sent
        } else {
            SendOutcome::Resent
        };
        self.successful_sends = self.successful_sends.saturating_add(1);
        self.send_status = ActionStatus::Success;
        self.code_sent = true;
        outcome
    }

    pub fn record_send_failure(&mut self) {
        self.send_status = ActionStatus::Error;
        self.code_sent = false;
    }

    /// Verify attempted outside the validity window
    pub fn record_expired(&mut self) {
        self.token = None;
        self.verify_status = ActionStatus::Error;
    }

    pub fn record_verified(&mut self, token: String) {
        self.token = Some(token);
        self.verify_status = ActionStatus::Success;
    }

    pub fn record_verify_failure(&mut self) {
        self.token = None;
        self.verify_status = ActionStatus::Error;
    }
}
