//! Periodic house refresh — keeps the device layer's view of the loads
//! current while the rules run.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::delayed_action::deadline_after;
use crate::ports::House;

/// Call [`House::refresh`] every `every` until `shutdown` is cancelled.
///
/// The first refresh happens one period after the call. A failed refresh is
/// logged and retried on the next tick. Returns how many refreshes succeeded.
pub async fn keep_refreshed<H: House>(
    house: &H,
    every: Duration,
    shutdown: &CancellationToken,
) -> u32 {
    // tokio intervals reject a zero period.
    let every = every.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(deadline_after(Instant::now(), every), every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut refreshed: u32 = 0;
    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            _ = ticker.tick() => match house.refresh().await {
                Ok(()) => {
                    refreshed += 1;
                    tracing::debug!(house = house.name(), refreshed, "house refreshed");
                }
                Err(err) => {
                    tracing::warn!(house = house.name(), error = %err, "house refresh failed");
                }
            },
        }
    }

    tracing::debug!(house = house.name(), refreshed, "house refresh stopped");
    refreshed
}
