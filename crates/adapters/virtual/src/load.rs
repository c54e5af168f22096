//! Virtual dimmer load.
//!
//! Behaves like a lightpad-controlled dimmer: setting a new level reports a
//! `DimmerChange` to the load's triggers, and the lightpad's motion sensor
//! can be fired by hand with [`VirtualLoad::sense_motion`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use plumhub_app::ports::{Load, Trigger};
use plumhub_app::trigger_registry::TriggerRegistry;
use plumhub_domain::error::PlumHubError;
use plumhub_domain::event::LoadEvent;
use plumhub_domain::id::{LoadId, TriggerId};
use plumhub_domain::level::Level;
use plumhub_domain::load::LoadInfo;
use plumhub_domain::time::now;

/// A simulated dimmable load.
pub struct VirtualLoad {
    id: LoadId,
    name: String,
    info: Mutex<LoadInfo>,
    triggers: TriggerRegistry,
}

impl VirtualLoad {
    /// Create a load at level off.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, PlumHubError> {
        let info = LoadInfo::builder().name(name).build()?;
        Ok(Self {
            id: info.id,
            name: info.name.clone(),
            info: Mutex::new(info),
            triggers: TriggerRegistry::new(),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> LoadInfo {
        self.lock_info().clone()
    }

    #[must_use]
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Fire the lightpad's motion sensor.
    pub fn sense_motion(&self, intensity: u16) -> usize {
        self.emit(&LoadEvent::MotionSignal { intensity })
    }

    /// Deliver an arbitrary device event to the registered triggers.
    ///
    /// Returns how many triggers received it.
    pub fn emit(&self, event: &LoadEvent) -> usize {
        tracing::trace!(load = %self.name, event = %event, "dispatching event");
        self.triggers.dispatch(event)
    }

    fn lock_info(&self) -> MutexGuard<'_, LoadInfo> {
        self.info.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Load for VirtualLoad {
    fn id(&self) -> LoadId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.lock_info().level
    }

    fn set_level(&self, level: Level) {
        // The lock is released before dispatch: triggers may call back in.
        let changed = self.lock_info().update_level(level, now());
        if changed {
            tracing::info!(load = %self.name, %level, "level changed");
            self.emit(&LoadEvent::DimmerChange { level });
        } else {
            tracing::debug!(load = %self.name, %level, "level unchanged");
        }
    }

    fn set_trigger(&self, trigger: Trigger) -> TriggerId {
        self.triggers.register(trigger)
    }

    fn clear_trigger(&self, id: TriggerId) -> bool {
        self.triggers.unregister(id)
    }
}
