//! Verification flow module for email and SMS identity checks
//!
//! This module provides the reusable send-code / verify-code workflow:
//! - Pluggable identity validation, send and verify calls per channel
//! - Validity window enforced by a countdown timer
//! - Cooperative mutual exclusion across sibling flows
//! - Automatic reset whenever the observed identity changes

mod busy;
mod config;
mod service;
mod state;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use busy::{BusyFlag, BusyGuard};
pub use config::{FlowConfig, FlowMessages};
pub use service::VerificationFlow;
pub use state::FlowState;
pub use traits::{FieldError, IdentityRejection, VerificationChannel};
pub use types::{ActionStatus, FlowSnapshot, SendOutcome, VerifyOutcome};
