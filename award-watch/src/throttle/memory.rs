//! In-memory marker store for tests and dry runs.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::ThrottleError;
use super::store::{MarkerStore, Slot};

#[derive(Debug, Default)]
struct MemoryState {
    values: HashMap<Slot, String>,
    locked: HashSet<Slot>,
    lock_attempts: HashMap<Slot, usize>,
}

/// Marker store that keeps state in process memory.
///
/// Clones share state, so a clone can stand in for a competing process.
#[derive(Debug, Clone, Default)]
pub struct MemoryMarkerStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Preload a slot's value.
    pub fn set(&self, slot: Slot, value: impl Into<String>) {
        self.state().values.insert(slot, value.into());
    }

    /// Current value of a slot.
    pub fn get(&self, slot: Slot) -> Option<String> {
        self.state().values.get(&slot).cloned()
    }

    /// How many times the slot's lock has been requested.
    pub fn lock_attempts(&self, slot: Slot) -> usize {
        self.state().lock_attempts.get(&slot).copied().unwrap_or(0)
    }
}

/// Lock on one slot of a [`MemoryMarkerStore`], released on drop.
#[derive(Debug)]
pub struct MemoryLock {
    state: Arc<Mutex<MemoryState>>,
    slot: Slot,
}

impl Drop for MemoryLock {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .locked
            .remove(&self.slot);
    }
}

impl MarkerStore for MemoryMarkerStore {
    type Guard = MemoryLock;

    fn try_lock(&self, slot: Slot) -> Result<Option<MemoryLock>, ThrottleError> {
        let mut state = self.state();
        *state.lock_attempts.entry(slot).or_default() += 1;

        if !state.locked.insert(slot) {
            return Ok(None);
        }

        Ok(Some(MemoryLock {
            state: Arc::clone(&self.state),
            slot,
        }))
    }

    fn read(&self, slot: Slot) -> Result<Option<String>, ThrottleError> {
        Ok(self.get(slot))
    }

    fn write(&self, slot: Slot, value: &str) -> Result<(), ThrottleError> {
        self.set(slot, value);
        Ok(())
    }
}
