//! Startup helpers — waiting for the device layer to expose a load.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use plumhub_domain::error::PlumHubError;

use crate::ports::{House, Load};

/// Poll `house` every `interval` until a load called `name` is available.
///
/// Controllers take a few moments to report their loads after
/// [`House::initialize`], so `NotFound` is expected and retried quietly.
/// Other lookup errors are logged and retried as well.
///
/// Returns `None` if `shutdown` is cancelled before the load shows up.
pub async fn wait_for_load<H: House>(
    house: &H,
    name: &str,
    interval: Duration,
    shutdown: &CancellationToken,
) -> Option<Arc<H::Load>> {
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match house.load_by_name(name) {
            Ok(load) => {
                tracing::info!(load = load.name(), id = %load.id(), attempts, "found load");
                return Some(load);
            }
            Err(PlumHubError::NotFound(_)) => {
                tracing::trace!(load = name, attempts, "load not discovered yet");
            }
            Err(err) => {
                tracing::error!(load = name, error = %err, "load lookup failed");
            }
        }

        tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                tracing::warn!(load = name, attempts, "stopped waiting for load");
                return None;
            }
            () = tokio::time::sleep(interval) => {}
        }
    }
}
