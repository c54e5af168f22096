//! In-process trigger registry backing a load's subscriptions.

use std::sync::{Mutex, MutexGuard, PoisonError};

use plumhub_domain::event::LoadEvent;
use plumhub_domain::id::TriggerId;

use crate::ports::Trigger;

/// Set of triggers registered on one load.
///
/// Dispatch takes a snapshot of the registered triggers and calls them with
/// the lock released, so a trigger may register or clear triggers (its own
/// included) while it runs. A trigger cleared during a dispatch may still
/// receive that one event.
#[derive(Default)]
pub struct TriggerRegistry {
    triggers: Mutex<Vec<(TriggerId, Trigger)>>,
}

impl TriggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger and return its handle.
    pub fn register(&self, trigger: Trigger) -> TriggerId {
        let id = TriggerId::new();
        self.lock().push((id, trigger));
        id
    }

    /// Remove a trigger. Unknown handles are ignored and return `false`.
    pub fn unregister(&self, id: TriggerId) -> bool {
        let mut triggers = self.lock();
        let before = triggers.len();
        triggers.retain(|(registered, _)| *registered != id);
        triggers.len() != before
    }

    /// Deliver `event` to every trigger registered at call time, in
    /// registration order. Returns how many triggers were called.
    pub fn dispatch(&self, event: &LoadEvent) -> usize {
        let snapshot: Vec<Trigger> = self
            .lock()
            .iter()
            .map(|(_, trigger)| Trigger::clone(trigger))
            .collect();
        for trigger in &snapshot {
            trigger(event);
        }
        snapshot.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(TriggerId, Trigger)>> {
        self.triggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("len", &self.len())
            .finish()
    }
}
