//! # plumhub-app
//!
//! Application layer — the trigger/automation core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that device adapters must implement:
//!   - `Load` — set a level, register and deregister triggers
//!   - `House` — bring the device layer up, look loads up by name, refresh state
//! - Provide the **timing primitives**:
//!   - `DelayedAction` — run an effect after a duration unless cancelled
//!   - `ResettableMotionTimer` — turn a load off once motion has stopped for a duration
//! - Provide the **rule constructors** that turn a load and parameters into triggers
//! - Provide the **lifecycle loops** the daemon runs: waiting for a load, periodic refresh
//! - Provide **in-process infrastructure** (trigger registry) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `plumhub-domain` only (plus `tokio` for time and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod delayed_action;
pub mod error;
pub mod motion_timer;
pub mod ports;
pub mod refresh;
pub mod rules;
pub mod startup;
pub mod trigger_registry;

#[cfg(test)]
mod testing;
