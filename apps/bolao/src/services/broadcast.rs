//! The single shared grid message posted to the group.

use parking_lot::Mutex;

/// Where the current round's grid lives in the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRef {
    pub chat_id: i64,
    pub message_id: i64,
    pub round_id: i64,
    pub round_name: String,
}

#[derive(Debug, Default)]
pub struct BroadcastSlot {
    inner: Mutex<Option<BroadcastRef>>,
}

impl BroadcastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, broadcast: BroadcastRef) {
        *self.inner.lock() = Some(broadcast);
    }

    pub fn clear(&self) {
        *self.inner.lock() = None;
    }

    pub fn current(&self) -> Option<BroadcastRef> {
        self.inner.lock().clone()
    }

    /// The reference, only if it belongs to `round_id`.
    pub fn for_round(&self, round_id: i64) -> Option<BroadcastRef> {
        self.inner
            .lock()
            .as_ref()
            .filter(|b| b.round_id == round_id)
            .cloned()
    }

    /// Store `broadcast` unless a reference for its round already exists.
    /// Returns true when stored.
    pub fn set_if_absent(&self, broadcast: BroadcastRef) -> bool {
        let mut slot = self.inner.lock();
        match slot.as_ref() {
            Some(existing) if existing.round_id == broadcast.round_id => false,
            _ => {
                *slot = Some(broadcast);
                true
            }
        }
    }
}
