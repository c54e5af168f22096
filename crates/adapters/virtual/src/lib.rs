//! # plumhub-adapter-virtual
//!
//! Virtual house that provides simulated dimmer loads for testing and
//! demonstration, in place of a network of physical lightpads.
//!
//! ## Behaviour
//!
//! | Feature | Config key | Effect |
//! |---------|------------|--------|
//! | Loads | `loads` | One dimmer per name, starting at level 0 |
//! | Slow discovery | `discovery_delay_ms` | Loads become visible only after the delay |
//! | Motion | `motion_interval_secs` | Every load reports motion on that cadence |
//! | Refresh | n/a | `refresh()` re-reads and logs every load's level |
//!
//! Setting a load to a new level reports a `DimmerChange` to its triggers,
//! like a real dimmer would.
//!
//! ## Dependency rule
//!
//! Depends on `plumhub-app` (port traits) and `plumhub-domain` only.

mod config;
mod error;
mod load;
mod simulation;

pub use config::VirtualConfig;
pub use error::VirtualError;
pub use load::VirtualLoad;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use plumhub_app::ports::House;
use plumhub_domain::error::{NotFoundError, PlumHubError};

use simulation::LoadMap;

/// Virtual house holding simulated loads.
pub struct VirtualHouse {
    config: VirtualConfig,
    loads: LoadMap,
    shutdown: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    initialized: bool,
}

impl Default for VirtualHouse {
    fn default() -> Self {
        Self::new(VirtualConfig::default())
    }
}

impl VirtualHouse {
    #[must_use]
    pub fn new(config: VirtualConfig) -> Self {
        Self {
            config,
            loads: Arc::new(RwLock::new(HashMap::new())),
            shutdown: CancellationToken::new(),
            tasks: Vec::new(),
            initialized: false,
        }
    }

    /// All loads discovered so far.
    #[must_use]
    pub fn loads(&self) -> Vec<Arc<VirtualLoad>> {
        self.loads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn build_loads(&self) -> Result<Vec<Arc<VirtualLoad>>, VirtualError> {
        let mut seen = HashSet::new();
        let mut loads = Vec::with_capacity(self.config.loads.len());
        for name in &self.config.loads {
            if !seen.insert(name.as_str()) {
                return Err(VirtualError::DuplicateLoad(name.clone()));
            }
            let load = VirtualLoad::new(name.as_str()).map_err(VirtualError::Domain)?;
            loads.push(Arc::new(load));
        }
        Ok(loads)
    }
}

impl House for VirtualHouse {
    type Load = VirtualLoad;

    fn name(&self) -> &'static str {
        "virtual"
    }

    async fn initialize(&mut self) -> Result<(), PlumHubError> {
        if self.initialized {
            return Err(VirtualError::AlreadyInitialized.into());
        }
        let loads = self.build_loads()?;

        let delay = self.config.discovery_delay();
        if delay.is_zero() {
            simulation::publish(&self.loads, loads);
        } else {
            tracing::info!(delay_ms = self.config.discovery_delay_ms, "loads will appear after discovery delay");
            self.tasks.push(simulation::spawn_discovery(
                Arc::clone(&self.loads),
                loads,
                delay,
                self.shutdown.clone(),
            ));
        }

        if let Some(interval) = self.config.motion_interval() {
            tracing::info!(every_secs = self.config.motion_interval_secs, "simulating motion");
            self.tasks.push(simulation::spawn_motion(
                Arc::clone(&self.loads),
                interval,
                self.config.motion_intensity,
                self.shutdown.clone(),
            ));
        }

        self.initialized = true;
        Ok(())
    }

    fn load_by_name(&self, name: &str) -> Result<Arc<VirtualLoad>, PlumHubError> {
        self.loads
            .read()
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
        if !self.initialized || self.shutdown.is_cancelled() {
            return Err(VirtualError::NotRunning.into());
        }
        for load in self.loads() {
            let info = load.snapshot();
            tracing::debug!(
                load = %info.name,
                level = %info.level,
                last_changed = %info.last_changed,
                "load refreshed"
            );
        }
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), PlumHubError> {
        self.shutdown.cancel();
        for task in self.tasks.drain(..) {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "virtual house task ended abnormally");
            }
        }
        Ok(())
    }
}
