//! Form field binding: observed input values and the per-field indicator
//! and message registry the flows write into.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::watch;

/// Visual indicator of one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Default,
    Error,
    Success,
}

/// Indicator plus the inline message shown under the input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldStatus {
    pub state: FieldState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Shared registry of field statuses keyed by field name.
///
/// Cloning is cheap and every clone sees the same fields, so sibling flows
/// and the form that owns them write into one registry.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    inner: Arc<Mutex<HashMap<String, FieldStatus>>>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field as failing with a message
    pub fn set_error(&self, field: &str, message: impl Into<String>) {
        self.set(field, FieldState::Error, Some(message.into()));
    }

    /// Mark a field as confirmed with a message
    pub fn set_success(&self, field: &str, message: impl Into<String>) {
        self.set(field, FieldState::Success, Some(message.into()));
    }

    /// Show a neutral message without changing the indicator
    pub fn set_info(&self, field: &str, message: impl Into<String>) {
        self.set(field, FieldState::Default, Some(message.into()));
    }

    /// Change the indicator and keep the current message
    pub fn set_state(&self, field: &str, state: FieldState) {
        self.lock().entry(field.to_string()).or_default().state = state;
    }

    pub fn clear(&self, field: &str) {
        self.lock().remove(field);
    }

    pub fn clear_many<I, S>(&self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = self.lock();
        for field in fields {
            inner.remove(field.as_ref());
        }
    }

    pub fn status(&self, field: &str) -> FieldStatus {
        self.lock().get(field).cloned().unwrap_or_default()
    }

    pub fn state(&self, field: &str) -> FieldState {
        self.lock().get(field).map(|s| s.state).unwrap_or_default()
    }

    pub fn message(&self, field: &str) -> Option<String> {
        self.lock().get(field).and_then(|s| s.message.clone())
    }

    /// Ordered copy of every field that currently has a status
    pub fn snapshot(&self) -> BTreeMap<String, FieldStatus> {
        self.lock()
            .iter()
            .map(|(name, status)| (name.clone(), status.clone()))
            .collect()
    }

    fn set(&self, field: &str, state: FieldState, message: Option<String>) {
        self.lock()
            .insert(field.to_string(), FieldStatus { state, message });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, FieldStatus>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Externally owned input value that flows observe but never write
#[derive(Debug)]
pub struct FormValue {
    tx: watch::Sender<String>,
}

impl Default for FormValue {
    fn default() -> Self {
        Self::new("")
    }
}

impl FormValue {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(initial.into());
        Self { tx }
    }

    /// Replace the value; observers are only notified on an actual change
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    pub fn get(&self) -> String {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}
