//! Background tasks standing in for the controllers: delayed discovery and
//! periodic motion.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use plumhub_app::delayed_action::deadline_after;
use plumhub_app::ports::Load;

use crate::load::VirtualLoad;

/// Loads discovered so far, keyed by display name.
pub(crate) type LoadMap = Arc<RwLock<HashMap<String, Arc<VirtualLoad>>>>;

pub(crate) fn publish(map: &LoadMap, loads: Vec<Arc<VirtualLoad>>) {
    let mut map = map.write().unwrap_or_else(PoisonError::into_inner);
    for load in loads {
        tracing::info!(load = load.name(), id = %load.id(), "load discovered");
        map.insert(load.name().to_string(), load);
    }
}

/// Publish `loads` into `map` once `delay` has passed.
pub(crate) fn spawn_discovery(
    map: LoadMap,
    loads: Vec<Arc<VirtualLoad>>,
    delay: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                tracing::debug!("discovery stopped before completion");
            }
            () = tokio::time::sleep(delay) => publish(&map, loads),
        }
    })
}

/// Fire a motion signal on every discovered load each `interval`.
pub(crate) fn spawn_motion(
    map: LoadMap,
    interval: Duration,
    intensity: u16,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = deadline_after(tokio::time::Instant::now(), interval);
        let mut ticker = tokio::time::interval_at(start, interval);
        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let loads: Vec<Arc<VirtualLoad>> = map
                        .read()
                        .unwrap_or_else(PoisonError::into_inner)
                        .values()
                        .cloned()
                        .collect();
                    for load in loads {
                        tracing::debug!(load = load.name(), intensity, "simulated motion");
                        load.sense_motion(intensity);
                    }
                }
            }
        }
        tracing::debug!("motion simulation stopped");
    })
}
