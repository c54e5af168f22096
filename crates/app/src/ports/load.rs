//! Load port — the controllable device endpoint rules act upon.
//!
//! The device layer owns every load. The rule engine only holds shared
//! references, sets levels, and subscribes triggers to the load's events.

use std::sync::Arc;

use plumhub_domain::event::LoadEvent;
use plumhub_domain::id::{LoadId, TriggerId};
use plumhub_domain::level::Level;

/// Callback invoked by the device layer for every event a load emits.
///
/// Triggers are fire-and-forget: they return nothing and must not block.
pub type Trigger = Arc<dyn Fn(&LoadEvent) + Send + Sync>;

/// A controllable load (typically a dimmer) owned by the device layer.
///
/// Implementations must allow [`set_trigger`](Self::set_trigger) and
/// [`clear_trigger`](Self::clear_trigger) to be called concurrently, including
/// from inside a trigger that is being dispatched.
pub trait Load: Send + Sync {
    fn id(&self) -> LoadId;

    fn name(&self) -> &str;

    /// Last level known to the device layer.
    fn level(&self) -> Level;

    /// Ask the device to move to `level`.
    ///
    /// Failures are the device layer's concern and are not reported back.
    fn set_level(&self, level: Level);

    /// Register a trigger, returning the handle needed to remove it.
    fn set_trigger(&self, trigger: Trigger) -> TriggerId;

    /// Remove a trigger. Returns `false` when `id` was not registered.
    fn clear_trigger(&self, id: TriggerId) -> bool;
}

impl<T: Load + ?Sized> Load for Arc<T> {
    fn id(&self) -> LoadId {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn level(&self) -> Level {
        (**self).level()
    }

    fn set_level(&self, level: Level) {
        (**self).set_level(level);
    }

    fn set_trigger(&self, trigger: Trigger) -> TriggerId {
        (**self).set_trigger(trigger)
    }

    fn clear_trigger(&self, id: TriggerId) -> bool {
        (**self).clear_trigger(id)
    }
}

/// A trigger registration that is cleared when dropped.
///
/// Ties the lifetime of a subscription to a scope, so a task that returns,
/// fails, or is aborted never leaves its trigger behind on the load.
pub struct Subscription<L: Load + ?Sized> {
    load: Arc<L>,
    id: TriggerId,
}

impl<L: Load + ?Sized> Subscription<L> {
    /// Register `trigger` on `load`.
    pub fn register(load: Arc<L>, trigger: Trigger) -> Self {
        let id = load.set_trigger(trigger);
        tracing::debug!(load = load.name(), trigger_id = %id, "trigger registered");
        Self { load, id }
    }

    #[must_use]
    pub fn id(&self) -> TriggerId {
        self.id
    }
}

impl<L: Load + ?Sized> Drop for Subscription<L> {
    fn drop(&mut self) {
        if self.load.clear_trigger(self.id) {
            tracing::debug!(load = self.load.name(), trigger_id = %self.id, "trigger cleared");
        } else {
            tracing::debug!(
                load = self.load.name(),
                trigger_id = %self.id,
                "trigger was already gone"
            );
        }
    }
}
