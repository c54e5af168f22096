//! Rule constructors — close over a target load and parameters and return the
//! trigger to install on it.
//!
//! | Rule | Reacts to | Effect |
//! |------|-----------|--------|
//! | [`turn_on_on_motion`] | motion above [`MOTION_THRESHOLD`] | `set_level(level)` |
//! | [`arm_off_timer_on_brighten`] | dimmer change above [`BRIGHTEN_THRESHOLD`] | spawns a [`ResettableMotionTimer`] |

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use plumhub_domain::event::LoadEvent;
use plumhub_domain::level::Level;

use crate::error::RuleError;
use crate::motion_timer::ResettableMotionTimer;
use crate::ports::{Load, Trigger};

/// Motion intensity a signal must exceed to count as someone being there.
pub const MOTION_THRESHOLD: u16 = 10;

/// Level a dimmer change must exceed to count as the light being turned on.
pub const BRIGHTEN_THRESHOLD: Level = Level::new(10);

/// Turn `load` on to `level` whenever motion is sensed.
///
/// There is no already-on check: every qualifying signal issues `set_level`
/// again.
pub fn turn_on_on_motion<L: Load + ?Sized + 'static>(load: Arc<L>, level: Level) -> Trigger {
    Arc::new(move |event: &LoadEvent| match event {
        LoadEvent::MotionSignal { intensity } if *intensity > MOTION_THRESHOLD => {
            tracing::info!(load = load.name(), intensity, %level, "motion detected, turning on");
            load.set_level(level);
        }
        LoadEvent::MotionSignal { intensity } => {
            tracing::trace!(load = load.name(), intensity, "motion below threshold");
        }
        LoadEvent::DimmerChange { .. }
        | LoadEvent::PowerChanged { .. }
        | LoadEvent::Unrecognized { .. } => {}
    })
}

/// Start an auto-off timer whenever `load` is brightened.
///
/// Each qualifying dimmer change spawns its own [`ResettableMotionTimer`] on
/// the runtime the rule was built on, under a fresh root token: the timer
/// outlives the trigger call that started it.
///
/// # Errors
///
/// Returns [`RuleError::NoRuntime`] when called outside a tokio runtime.
pub fn arm_off_timer_on_brighten<L: Load + ?Sized + 'static>(
    load: Arc<L>,
    duration: Duration,
) -> Result<Trigger, RuleError> {
    let runtime = Handle::try_current()?;
    Ok(Arc::new(move |event: &LoadEvent| match event {
        LoadEvent::DimmerChange { level } if level.is_above(BRIGHTEN_THRESHOLD) => {
            tracing::info!(load = load.name(), %level, "light turned on, starting off timer");
            let timer = ResettableMotionTimer::new(Arc::clone(&load), duration);
            runtime.spawn(async move {
                let root = CancellationToken::new();
                timer.start(&root).await
            });
        }
        LoadEvent::DimmerChange { .. }
        | LoadEvent::MotionSignal { .. }
        | LoadEvent::PowerChanged { .. }
        | LoadEvent::Unrecognized { .. } => {}
    }))
}
