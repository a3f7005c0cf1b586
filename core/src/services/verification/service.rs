//! Main verification flow implementation

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use eq_shared::utils::{mask_email, mask_phone_number};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing;
use uuid::Uuid;

use crate::domain::entities::countdown_timer::CountdownTimer;
use crate::domain::entities::form_field::{FieldState, FormFields};
use crate::errors::DomainResult;

use super::busy::BusyFlag;
use super::config::FlowConfig;
use super::state::FlowState;
use super::traits::{IdentityRejection, VerificationChannel};
use super::types::{FlowSnapshot, SendOutcome, VerifyOutcome};

/// Drives the send-code / verify-code challenge for one observed identity.
///
/// The identity and code are owned by the form and observed through watch
/// receivers. Any mutation of the identity resets everything (token,
/// statuses, timer, field messages). A watcher task stops the countdown as
/// soon as the identity is edited, and every read or action applies a
/// pending reset first, so an edit is never missed even when it ends on the
/// original value.
///
/// Network failures never escape: they become field messages and a status
/// the caller can poll, plus the returned outcome.
pub struct VerificationFlow<C: VerificationChannel + ?Sized> {
    /// Owner id used on the shared busy flag
    id: Uuid,
    /// Validation, send and verify calls
    channel: Arc<C>,
    /// Flow configuration
    config: FlowConfig,
    /// Shared with sibling flows of the same form
    busy: BusyFlag,
    /// Shared field registry of the form
    fields: FormFields,
    code: watch::Receiver<String>,
    binding: Arc<Binding>,
    /// Resets the timer on identity edits; aborted on drop
    watcher: Option<JoinHandle<()>>,
}

/// Identity, state and timer, shared with the watcher task
struct Binding {
    flow_id: Uuid,
    identity: Mutex<watch::Receiver<String>>,
    state: Mutex<FlowState>,
    timer: CountdownTimer,
    fields: FormFields,
    /// Identity fields followed by the code field
    message_fields: Vec<String>,
}

impl Binding {
    // Apply a pending identity mutation; returns the current identity
    fn sync(&self) -> String {
        let (current, mutated) = {
            let mut identity = self.identity.lock().unwrap_or_else(PoisonError::into_inner);
            // A closed sender cannot report versions; rebind then compares values
            let mutated = identity.has_changed().unwrap_or(false);
            let current = identity.borrow_and_update().clone();
            (current, mutated)
        };

        let mut state = self.lock_state();
        if state.rebind(&current, mutated) {
            self.timer.reset();
            self.fields.clear_many(&self.message_fields);
            tracing::debug!(
                flow = %self.flow_id,
                identity = %mask_identity(&current),
                epoch = state.epoch(),
                event = "flow_reset",
                "Identity changed, verification state reset"
            );
        }
        current
    }

    fn lock_state(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Needs a Tokio runtime; without one, resets wait for the next read
fn watch_identity(
    mut identity: watch::Receiver<String>,
    binding: Weak<Binding>,
) -> Option<JoinHandle<()>> {
    let runtime = Handle::try_current().ok()?;
    Some(runtime.spawn(async move {
        while identity.changed().await.is_ok() {
            match binding.upgrade() {
                Some(binding) => {
                    binding.sync();
                }
                None => break,
            }
        }
    }))
}

impl<C: VerificationChannel + ?Sized> VerificationFlow<C> {
    /// Create a new verification flow
    ///
    /// # Arguments
    ///
    /// * `channel` - Validation and network calls for this identity type
    /// * `config` - Validity window, field names and texts
    /// * `busy` - Busy flag shared with sibling flows
    /// * `fields` - Field registry the flow writes messages into
    /// * `identity` - Observed identity value
    /// * `code` - Observed code value
    pub fn new(
        channel: Arc<C>,
        config: FlowConfig,
        busy: BusyFlag,
        fields: FormFields,
        mut identity: watch::Receiver<String>,
        code: watch::Receiver<String>,
    ) -> DomainResult<Self> {
        config.validate()?;
        let id = Uuid::new_v4();
        let bound_identity = identity.borrow_and_update().clone();
        let watched = identity.clone();

        let mut message_fields = config.identity_fields.clone();
        message_fields.push(config.code_field.clone());

        let binding = Arc::new(Binding {
            flow_id: id,
            identity: Mutex::new(identity),
            state: Mutex::new(FlowState::new(bound_identity)),
            timer: CountdownTimer::new(config.ttl_seconds),
            fields: fields.clone(),
            message_fields,
        });
        let watcher = watch_identity(watched, Arc::downgrade(&binding));

        Ok(Self {
            id,
            channel,
            config,
            busy,
            fields,
            code,
            binding,
            watcher,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Countdown of the current identity's code
    pub fn timer(&self) -> &CountdownTimer {
        self.sync_identity();
        &self.binding.timer
    }

    /// Current state with the UI decisions derived from it
    pub fn snapshot(&self) -> FlowSnapshot {
        let identity = self.sync_identity();
        let code = self.code.borrow().clone();
        let identity_valid = self.channel.validate_identity(&identity).is_ok();
        let state = self.lock_state().clone();

        FlowSnapshot {
            identity,
            code,
            token: state.token().map(str::to_string),
            verified: state.is_verified(),
            code_sent: state.code_sent(),
            send_status: state.send_status(),
            verify_status: state.verify_status(),
            remaining_seconds: self.binding.timer.remaining_seconds(),
            identity_valid,
            busy: self.busy.is_busy(),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.sync_identity();
        self.lock_state().is_verified()
    }

    /// Proof token for the current identity, if verified
    pub fn token(&self) -> Option<String> {
        self.sync_identity();
        self.lock_state().token().map(str::to_string)
    }

    pub fn can_send(&self) -> bool {
        self.snapshot().can_send()
    }

    pub fn can_verify(&self) -> bool {
        self.snapshot().can_verify()
    }

    /// Apply a pending identity change right away.
    ///
    /// Reads and actions do this too; forms call it after editing the
    /// identity so stale messages disappear without waiting for a read.
    pub fn refresh(&self) {
        self.sync_identity();
    }

    /// Send (or resend) a code to the current identity
    ///
    /// This method:
    /// 1. Skips entirely if a sibling action holds the busy flag
    /// 2. Clears messages on the identity and code inputs
    /// 3. Drops any previous verification
    /// 4. Validates the identity locally and stops on rejection
    /// 5. Calls the channel and restarts the timer on success
    ///
    /// The countdown ticks on the current Tokio runtime; polled elsewhere,
    /// the validity window still holds but no ticks are published.
    pub async fn on_send_code(&self) -> SendOutcome {
        let identity = self.sync_identity();

        let Some(_guard) = self.busy.try_acquire(self.id) else {
            tracing::debug!(
                flow = %self.id,
                event = "send_skipped_busy",
                "Another verification action is in flight"
            );
            return SendOutcome::Busy;
        };

        self.clear_messages();
        let epoch = {
            let mut state = self.lock_state();
            state.unverify();
            state.epoch()
        };

        if let Err(rejection) = self.channel.validate_identity(&identity) {
            self.lock_state().record_send_rejected();
            self.binding.timer.reset();
            self.surface_rejection(rejection);
            tracing::warn!(
                flow = %self.id,
                identity = %mask_identity(&identity),
                event = "identity_invalid",
                "Identity failed validation, code not sent"
            );
            return SendOutcome::InvalidIdentity;
        }

        let result = self.channel.send_code(&identity).await;

        self.sync_identity();
        let mut state = self.lock_state();
        if state.epoch() != epoch {
            drop(state);
            tracing::info!(
                flow = %self.id,
                event = "send_result_discarded",
                "Identity changed while sending, result discarded"
            );
            return SendOutcome::Stale;
        }

        // The state lock stays held so a concurrent reset lands after this
        match result {
            Ok(()) => {
                let outcome = state.record_send_success();
                self.binding.timer.start();
                let text = self
                    .config
                    .messages
                    .sent_text(outcome == SendOutcome::Resent, self.config.ttl_seconds);
                self.fields.set_info(&self.config.code_field, text);
                tracing::info!(
                    flow = %self.id,
                    identity = %mask_identity(&identity),
                    resent = outcome == SendOutcome::Resent,
                    ttl_seconds = self.config.ttl_seconds,
                    event = "code_sent",
                    "Verification code sent"
                );
                outcome
            }
            Err(error) => {
                state.record_send_failure();
                self.binding.timer.reset();
                let text = self.config.messages.send_errors.message_for(&error);
                for field in &self.config.identity_fields {
                    self.fields.set_error(field, text);
                }
                tracing::warn!(
                    flow = %self.id,
                    identity = %mask_identity(&identity),
                    status = ?error.status,
                    error = %error,
                    event = "code_send_failed",
                    "Failed to send verification code"
                );
                SendOutcome::Failed(error.kind())
            }
        }
    }

    /// Check the entered code against the current identity
    ///
    /// This method:
    /// 1. Skips entirely if a sibling action holds the busy flag
    /// 2. Requires a non-blank code
    /// 3. Treats a stopped timer as an expired window, without a network call
    /// 4. Calls the channel; on success stores the token and stops the timer
    pub async fn on_verify_code(&self) -> VerifyOutcome {
        let identity = self.sync_identity();

        let Some(_guard) = self.busy.try_acquire(self.id) else {
            tracing::debug!(
                flow = %self.id,
                event = "verify_skipped_busy",
                "Another verification action is in flight"
            );
            return VerifyOutcome::Busy;
        };

        let code_field = &self.config.code_field;
        self.fields.clear(code_field);

        let code = self.code.borrow().trim().to_string();
        if code.is_empty() {
            self.fields
                .set_error(code_field, &self.config.messages.code_required);
            return VerifyOutcome::CodeRequired;
        }

        if !self.binding.timer.is_running() {
            self.lock_state().record_expired();
            self.fields.set_error(code_field, &self.config.messages.expired);
            tracing::info!(
                flow = %self.id,
                identity = %mask_identity(&identity),
                event = "code_expired",
                "Verification attempted outside the validity window"
            );
            return VerifyOutcome::Expired;
        }

        let epoch = self.lock_state().epoch();
        let result = self.channel.verify_code(&identity, &code).await;

        self.sync_identity();
        let mut state = self.lock_state();
        if state.epoch() != epoch {
            drop(state);
            tracing::info!(
                flow = %self.id,
                event = "verify_result_discarded",
                "Identity changed while verifying, result discarded"
            );
            return VerifyOutcome::Stale;
        }

        match result {
            Ok(response) => {
                state.record_verified(self.channel.token(&response));
                self.binding.timer.reset();
                self.fields
                    .set_success(code_field, &self.config.messages.verified);
                for field in &self.config.identity_fields {
                    self.fields.set_state(field, FieldState::Success);
                }
                tracing::info!(
                    flow = %self.id,
                    identity = %mask_identity(&identity),
                    event = "code_verified",
                    "Verification code accepted"
                );
                VerifyOutcome::Verified
            }
            Err(error) => {
                state.record_verify_failure();
                let text = self.config.messages.verify_errors.message_for(&error);
                self.fields.set_error(code_field, text);
                tracing::warn!(
                    flow = %self.id,
                    identity = %mask_identity(&identity),
                    status = ?error.status,
                    error = %error,
                    event = "code_verify_failed",
                    "Verification code rejected"
                );
                VerifyOutcome::Rejected(error.kind())
            }
        }
    }

    fn sync_identity(&self) -> String {
        self.binding.sync()
    }

    fn clear_messages(&self) {
        self.fields.clear_many(&self.binding.message_fields);
    }

    fn surface_rejection(&self, rejection: IdentityRejection) {
        let default_text = rejection
            .message
            .unwrap_or_else(|| self.config.messages.identity_invalid.clone());

        if rejection.field_errors.is_empty() {
            for field in &self.config.identity_fields {
                self.fields.set_error(field, default_text.as_str());
            }
            return;
        }

        for error in rejection.field_errors {
            if let Some(field) = self.config.identity_fields.get(error.identity_field) {
                let text = error.message.unwrap_or_else(|| default_text.clone());
                self.fields.set_error(field, text);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FlowState> {
        self.binding.lock_state()
    }
}

impl<C: VerificationChannel + ?Sized> Drop for VerificationFlow<C> {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

// Email addresses and phone numbers are never logged in full
fn mask_identity(identity: &str) -> String {
    if identity.contains('@') {
        mask_email(identity)
    } else {
        mask_phone_number(identity)
    }
}
