//! Single-active-session guard.

use gridboard_core::ItemId;
use std::cell::Cell;
use std::rc::Rc;

/// Shared slot recording which item, if any, has a gesture in progress.
///
/// Clones share the slot. `Rc` keeps this `!Send`: sessions live on the UI thread.
#[derive(Debug, Clone, Default)]
pub struct SessionLock {
    active: Rc<Cell<Option<ItemId>>>,
}

impl SessionLock {
    /// Unheld lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Item whose session holds the lock.
    #[must_use]
    pub fn active(&self) -> Option<ItemId> {
        self.active.get()
    }

    /// True while a session is in progress.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.active.get().is_some()
    }

    /// Take the lock for `item`, or `None` if another session holds it.
    #[must_use]
    pub fn try_acquire(&self, item: ItemId) -> Option<SessionLease> {
        if self.is_held() {
            return None;
        }
        self.active.set(Some(item));
        Some(SessionLease {
            slot: Rc::clone(&self.active),
            item,
        })
    }
}

/// Proof of holding the lock. Dropping it releases the lock.
#[derive(Debug)]
pub struct SessionLease {
    slot: Rc<Cell<Option<ItemId>>>,
    item: ItemId,
}

impl SessionLease {
    /// Item the lease was taken for.
    #[must_use]
    pub fn item(&self) -> ItemId {
        self.item
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.slot.set(None);
    }
}
