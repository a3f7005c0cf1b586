//! Ordering of concurrently open modal dialogs.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// z-index of the bottom-most modal
pub const DEFAULT_BASE_Z_INDEX: u32 = 1000;

const Z_INDEX_STEP: u32 = 10;

/// Identifier handed out when a modal opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(Uuid);

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an open modal renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalLayer {
    /// Topmost: receives focus, backdrop clicks and dismissal keys
    Active,
    /// Covered by a later modal: only its dimming backdrop is drawn
    Backdrop,
}

/// LIFO registry of open modals.
///
/// Owned by whichever UI tree creates it; clones share the same stack.
#[derive(Debug, Clone)]
pub struct ModalStack {
    open: Arc<Mutex<Vec<ModalId>>>,
    base_z_index: u32,
}

impl Default for ModalStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStack {
    pub fn new() -> Self {
        Self::with_base_z_index(DEFAULT_BASE_Z_INDEX)
    }

    pub fn with_base_z_index(base_z_index: u32) -> Self {
        Self {
            open: Arc::new(Mutex::new(Vec::new())),
            base_z_index,
        }
    }

    /// Push a new modal on top
    pub fn open(&self) -> ModalId {
        let id = ModalId(Uuid::new_v4());
        self.lock().push(id);
        tracing::debug!(modal = %id, event = "modal_opened", "Modal opened");
        id
    }

    /// Remove a modal wherever it sits in the stack
    pub fn close(&self, id: ModalId) -> DomainResult<()> {
        let mut open = self.lock();
        let position = open
            .iter()
            .position(|candidate| *candidate == id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("modal {}", id),
            })?;
        open.remove(position);
        tracing::debug!(modal = %id, event = "modal_closed", "Modal closed");
        Ok(())
    }

    /// Dismiss whatever is on top (escape key)
    pub fn close_topmost(&self) -> Option<ModalId> {
        self.lock().pop()
    }

    pub fn topmost(&self) -> Option<ModalId> {
        self.lock().last().copied()
    }

    pub fn is_topmost(&self, id: ModalId) -> bool {
        self.topmost() == Some(id)
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.lock().contains(&id)
    }

    pub fn layer(&self, id: ModalId) -> Option<ModalLayer> {
        let open = self.lock();
        let position = open.iter().position(|candidate| *candidate == id)?;
        if position + 1 == open.len() {
            Some(ModalLayer::Active)
        } else {
            Some(ModalLayer::Backdrop)
        }
    }

    pub fn z_index(&self, id: ModalId) -> Option<u32> {
        let open = self.lock();
        let position = open.iter().position(|candidate| *candidate == id)?;
        let position = u32::try_from(position).unwrap_or(u32::MAX / Z_INDEX_STEP);
        Some(self.base_z_index.saturating_add(position.saturating_mul(Z_INDEX_STEP)))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ModalId>> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
