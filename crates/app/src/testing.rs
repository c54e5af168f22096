//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::time::Instant;

use plumhub_domain::error::{NotFoundError, PlumHubError};
use plumhub_domain::event::LoadEvent;
use plumhub_domain::id::{LoadId, TriggerId};
use plumhub_domain::level::Level;

use crate::ports::{House, Load, Trigger};
use crate::trigger_registry::TriggerRegistry;

/// Load that records every `set_level` call with the (tokio) instant it
/// happened at. Unlike a real dimmer it never emits events on its own;
/// tests push events through [`SpyLoad::emit`].
#[derive(Default)]
pub(crate) struct SpyLoad {
    id: LoadId,
    level: Mutex<Level>,
    calls: Mutex<Vec<(Level, Instant)>>,
    triggers: TriggerRegistry,
}

impl SpyLoad {
    pub(crate) fn at(level: Level) -> Self {
        Self {
            level: Mutex::new(level),
            ..Self::default()
        }
    }

    pub(crate) fn emit(&self, event: &LoadEvent) -> usize {
        self.triggers.dispatch(event)
    }

    pub(crate) fn calls(&self) -> Vec<(Level, Instant)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn levels(&self) -> Vec<Level> {
        self.calls().into_iter().map(|(level, _)| level).collect()
    }

    pub(crate) fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}

impl Load for SpyLoad {
    fn id(&self) -> LoadId {
        self.id
    }

    fn name(&self) -> &str {
        "spy"
    }

    fn level(&self) -> Level {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_level(&self, level: Level) {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner) = level;
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, Instant::now()));
    }

    fn set_trigger(&self, trigger: Trigger) -> TriggerId {
        self.triggers.register(trigger)
    }

    fn clear_trigger(&self, id: TriggerId) -> bool {
        self.triggers.unregister(id)
    }
}

/// Assert that `actual` is `expected` after `origin`, or at most 5ms later
/// to absorb timer-wheel rounding.
#[track_caller]
pub(crate) fn assert_at(actual: Instant, origin: Instant, expected: std::time::Duration) {
    let elapsed = actual.duration_since(origin);
    let tolerance = std::time::Duration::from_millis(5);
    assert!(
        elapsed >= expected && elapsed <= expected + tolerance,
        "expected event at {expected:?}, happened at {elapsed:?}"
    );
}

/// House whose loads are added by the test at arbitrary times, and whose
/// lookups and refreshes can be made to fail a set number of times.
#[derive(Default)]
pub(crate) struct ManualHouse {
    loads: Mutex<HashMap<String, Arc<SpyLoad>>>,
    pub(crate) lookup_failures: Mutex<u32>,
    pub(crate) refresh_failures: Mutex<u32>,
    refreshes: Mutex<Vec<Instant>>,
}

impl ManualHouse {
    pub(crate) fn add(&self, name: &str) -> Arc<SpyLoad> {
        let load = Arc::new(SpyLoad::default());
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::clone(&load));
        load
    }

    /// Instants of every refresh attempt, failed ones included.
    pub(crate) fn refreshes(&self) -> Vec<Instant> {
        self.refreshes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn take_failure(counter: &Mutex<u32>) -> bool {
    let mut left = counter.lock().unwrap_or_else(PoisonError::into_inner);
    if *left == 0 {
        return false;
    }
    *left -= 1;
    true
}

impl House for ManualHouse {
    type Load = SpyLoad;

    fn name(&self) -> &'static str {
        "manual"
    }

    async fn initialize(&mut self) -> Result<(), PlumHubError> {
        Ok(())
    }

    fn load_by_name(&self, name: &str) -> Result<Arc<SpyLoad>, PlumHubError> {
        if take_failure(&self.lookup_failures) {
            return Err(PlumHubError::Device("controller unreachable".into()));
        }
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Load",
                    id: name.to_string(),
                }
                .into()
            })
    }

    async fn refresh(&self) -> Result<(), PlumHubError> {
        self.refreshes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Instant::now());
        if take_failure(&self.refresh_failures) {
            return Err(PlumHubError::Device("controller unreachable".into()));
        }
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), PlumHubError> {
        Ok(())
    }
}
