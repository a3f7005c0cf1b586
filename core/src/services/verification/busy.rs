//! Busy flag shared by sibling flows so that at most one network action is
//! outstanding across a form.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

/// Owner-scoped mutual exclusion indicator.
///
/// Clones share one flag. Only [`BusyFlag::try_acquire`] sets it, and only the
/// returned guard clears it, so a flow can never release an action that a
/// sibling started.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    holder: Arc<Mutex<Option<Uuid>>>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().is_some()
    }

    /// Owner of the action in flight, if any
    pub fn holder(&self) -> Option<Uuid> {
        *self.lock()
    }

    /// Set the flag for `owner` unless someone already holds it
    pub fn try_acquire(&self, owner: Uuid) -> Option<BusyGuard> {
        let mut holder = self.lock();
        if holder.is_some() {
            return None;
        }
        *holder = Some(owner);
        Some(BusyGuard {
            flag: self.clone(),
            owner,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<Uuid>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the busy flag until dropped
#[derive(Debug)]
pub struct BusyGuard {
    flag: BusyFlag,
    owner: Uuid,
}

impl BusyGuard {
    pub fn owner(&self) -> Uuid {
        self.owner
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut holder = self.flag.lock();
        if *holder == Some(self.owner) {
            *holder = None;
        }
    }
}
