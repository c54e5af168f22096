//! House port — lifecycle and lookup for the device-control layer.
//!
//! A house bridges an external controller network (virtual, Plum lightpads, …)
//! into plumhub. It discovers loads on startup, possibly in the background, and
//! hands out shared references to them by name.

use std::future::Future;
use std::sync::Arc;

use plumhub_domain::error::PlumHubError;

use super::load::Load;

/// A pluggable device layer.
///
/// The daemon calls the lifecycle methods in order:
///
/// 1. [`initialize`](Self::initialize) — connect and start discovery
/// 2. [`load_by_name`](Self::load_by_name) — polled until the wanted load shows up
/// 3. (rules run, driven by the house's own event dispatch, while
///    [`refresh`](Self::refresh) is called periodically)
/// 4. [`teardown`](Self::teardown) — stop background work
pub trait House: Send + Sync {
    type Load: Load + 'static;

    /// Unique name identifying this house implementation (e.g. `"virtual"`).
    fn name(&self) -> &'static str;

    /// Connect to the controllers and start discovering loads.
    ///
    /// Must not block until discovery finishes; loads may appear later.
    fn initialize(&mut self) -> impl Future<Output = Result<(), PlumHubError>> + Send;

    /// Look a load up by its display name.
    ///
    /// # Errors
    ///
    /// Returns [`PlumHubError::NotFound`] while no load with that name has
    /// been discovered.
    fn load_by_name(&self, name: &str) -> Result<Arc<Self::Load>, PlumHubError>;

    /// Re-read state from the controllers so known loads stay current.
    ///
    /// # Errors
    ///
    /// Returns an error if the house is not running or the controllers could
    /// not be reached. Callers retry on the next period.
    fn refresh(&self) -> impl Future<Output = Result<(), PlumHubError>> + Send;

    /// Called on graceful shutdown. Stop background tasks and connections.
    fn teardown(&mut self) -> impl Future<Output = Result<(), PlumHubError>> + Send;
}
