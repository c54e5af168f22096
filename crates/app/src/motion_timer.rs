//! Resettable motion timer — keeps a light's "off" deadline sliding forward
//! every time motion is observed.
//!
//! One timer chain owns one trigger on the load for its whole life. Each
//! motion signal cancels the pending [`DelayedAction`] and restarts the full
//! countdown from the instant the motion was seen. The chain ends when the
//! countdown completes (the load is turned off) or when the parent token is
//! cancelled (the load is left as is).
//!
//! ```text
//!              start()                 motion
//!   Idle ───────────────▶ Waiting ───────────────▶ Waiting'
//!                          │  │                     (new scope)
//!            parent cancel │  │ countdown expires
//!                          ▼  ▼
//!                Idle (level kept)   Idle (level 0)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use plumhub_domain::event::LoadEvent;
use plumhub_domain::level::Level;

use crate::delayed_action::{ArmOutcome, DelayedAction, deadline_after};
use crate::ports::{Load, Subscription, Trigger};

/// Why a timer chain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerExit {
    /// No motion for the full duration; the load was turned off.
    Expired,
    /// The parent scope was cancelled; the load was not touched.
    Cancelled,
}

/// Countdown scope currently in force: the token a motion signal cancels and
/// the instant the countdown started from.
struct Scope {
    token: CancellationToken,
    started: Instant,
}

impl Scope {
    fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            started: Instant::now(),
        }
    }
}

/// Turns a load off after `duration` without motion.
pub struct ResettableMotionTimer<L: Load + ?Sized> {
    load: Arc<L>,
    duration: Duration,
}

impl<L: Load + ?Sized + 'static> ResettableMotionTimer<L> {
    pub fn new(load: Arc<L>, duration: Duration) -> Self {
        Self { load, duration }
    }

    /// Run the timer chain until it expires or `parent` is cancelled.
    ///
    /// The motion trigger is registered before the first countdown begins and
    /// is cleared on every exit path, including when this future is dropped.
    pub async fn start(&self, parent: &CancellationToken) -> TimerExit {
        let scope = Arc::new(Mutex::new(Scope::child_of(parent)));
        let _subscription = Subscription::register(
            Arc::clone(&self.load),
            restart_on_motion(parent.clone(), Arc::clone(&scope)),
        );

        tracing::info!(
            load = self.load.name(),
            after_secs = self.duration.as_secs_f64(),
            "motion timer started"
        );

        let mut restarts: u32 = 0;
        loop {
            let (token, started) = {
                let current = lock(&scope);
                (current.token.clone(), current.started)
            };

            let load = Arc::clone(&self.load);
            let action = DelayedAction::until(
                deadline_after(started, self.duration),
                move || load.set_level(Level::OFF),
                token,
            );

            match action.run().await {
                ArmOutcome::Fired => {
                    tracing::info!(load = self.load.name(), restarts, "motion timer expired");
                    return TimerExit::Expired;
                }
                ArmOutcome::Cancelled if parent.is_cancelled() => {
                    tracing::info!(load = self.load.name(), restarts, "motion timer cancelled");
                    return TimerExit::Cancelled;
                }
                ArmOutcome::Cancelled => {
                    restarts += 1;
                    tracing::debug!(load = self.load.name(), restarts, "motion seen, countdown restarted");
                }
            }
        }
    }
}

/// Trigger that replaces the current scope on every motion signal.
///
/// Cancelling the old token and installing the new scope happen under one
/// lock, so the waiting loop always picks up a scope that is at least as
/// recent as the last motion.
fn restart_on_motion(parent: CancellationToken, scope: Arc<Mutex<Scope>>) -> Trigger {
    Arc::new(move |event: &LoadEvent| match event {
        LoadEvent::MotionSignal { .. } => {
            let mut current = lock(&scope);
            current.token.cancel();
            *current = Scope::child_of(&parent);
        }
        LoadEvent::DimmerChange { .. }
        | LoadEvent::PowerChanged { .. }
        | LoadEvent::Unrecognized { .. } => {}
    })
}

fn lock(scope: &Mutex<Scope>) -> MutexGuard<'_, Scope> {
    scope.lock().unwrap_or_else(PoisonError::into_inner)
}
