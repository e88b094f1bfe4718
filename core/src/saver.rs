//! Write coalescing — mutations mark the record dirty; suspend and quit
//! flush it once.
//!
//! Many small in-session mutations (regen ticks, pantry debits) become at
//! most one write per suspend/quit. The per-second cook checkpoints in
//! `activity` bypass this path on purpose: they write through immediately.

use crate::{state::PersistedState, store::SaveStore, types::Timestamp};

#[derive(Debug, Default)]
pub struct DirtySaveCoordinator {
    dirty: bool,
}

impl DirtySaveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent: marking an already-dirty record changes nothing.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist the record if anything changed since the last flush.
    ///
    /// Stamps `last_shutdown = now` before writing, so the next boot can
    /// measure its downtime. The flag clears whether or not the write
    /// lands — a failed flush is not retried here; the next mutation
    /// re-dirties and the next flush opportunity tries again.
    ///
    /// Returns true when a write was attempted.
    pub fn flush_if_dirty(
        &mut self,
        state: &mut PersistedState,
        store: &SaveStore,
        now: Timestamp,
    ) -> bool {
        if !self.dirty {
            return false;
        }
        state.last_shutdown = now;
        if let Err(e) = store.save(state) {
            log::error!("flush failed, progress since last save is at risk: {e}");
        }
        self.dirty = false;
        true
    }
}
