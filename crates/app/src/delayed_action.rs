//! Delayed action — a one-shot effect that runs at a deadline unless cancelled.
//!
//! The wait is an `async` race between the tokio timer and a
//! [`CancellationToken`]. Whoever wins decides whether the effect runs; the
//! effect itself never runs more than once because [`DelayedAction::run`]
//! consumes the action.
//!
//! Callers that must not wait spawn the future on its own task.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use plumhub_domain::level::Level;

use crate::ports::Load;

/// Horizon used in place of a deadline that does not fit in an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `from + duration`, parked at a far-future instant instead of overflowing.
#[must_use]
pub fn deadline_after(from: Instant, duration: Duration) -> Instant {
    from.checked_add(duration)
        .or_else(|| from.checked_add(FAR_FUTURE))
        .unwrap_or(from)
}

/// How a delayed action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOutcome {
    /// The deadline passed and the effect ran.
    Fired,
    /// The token was cancelled first; the effect was dropped without running.
    Cancelled,
}

/// An effect scheduled for a deadline, guarded by a cancellation token.
#[derive(Debug)]
pub struct DelayedAction<F> {
    deadline: Instant,
    effect: F,
    cancel: CancellationToken,
}

impl<F: FnOnce()> DelayedAction<F> {
    /// Schedule `effect` for `duration` from now.
    ///
    /// Durations too large to represent wait until cancelled.
    pub fn new(duration: Duration, effect: F, cancel: CancellationToken) -> Self {
        Self::until(deadline_after(Instant::now(), duration), effect, cancel)
    }

    /// Schedule `effect` for an absolute `deadline`.
    ///
    /// A deadline in the past fires on the first poll unless the token is
    /// already cancelled.
    pub fn until(deadline: Instant, effect: F, cancel: CancellationToken) -> Self {
        Self {
            deadline,
            effect,
            cancel,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// A clone of the token guarding this action. Cancelling it (any number
    /// of times, before or after the action resolves) is always safe.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the deadline or the cancellation, whichever comes first.
    ///
    /// Cancellation wins a tie.
    pub async fn run(self) -> ArmOutcome {
        let Self {
            deadline,
            effect,
            cancel,
        } = self;

        tokio::select! {
            biased;
            () = cancel.cancelled() => ArmOutcome::Cancelled,
            () = sleep_until(deadline) => {
                effect();
                ArmOutcome::Fired
            }
        }
    }
}

/// Run `effect` after `duration` unless `cancel` fires first.
pub async fn arm<F: FnOnce()>(
    duration: Duration,
    effect: F,
    cancel: &CancellationToken,
) -> ArmOutcome {
    DelayedAction::new(duration, effect, cancel.clone())
        .run()
        .await
}

/// Turn `load` off `duration` from now, unless `cancel` fires first.
///
/// The light is left untouched when cancelled.
pub async fn off_after<L: Load + ?Sized>(
    load: &L,
    duration: Duration,
    cancel: &CancellationToken,
) -> ArmOutcome {
    tracing::info!(
        load = load.name(),
        after_secs = duration.as_secs_f64(),
        "auto-off timer started"
    );
    let outcome = arm(duration, || load.set_level(Level::OFF), cancel).await;
    match outcome {
        ArmOutcome::Fired => tracing::info!(load = load.name(), "auto-off timer fired"),
        ArmOutcome::Cancelled => tracing::info!(load = load.name(), "auto-off timer cancelled"),
    }
    outcome
}
