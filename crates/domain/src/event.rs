//! Load events — what a load reports to its registered triggers.
//!
//! Events are transient: the device layer produces one per occurrence and
//! hands it to every trigger on the load. Nothing stores them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// An event emitted by a load.
///
/// Consumers match on the variants they care about and ignore the rest;
/// [`Unrecognized`](Self::Unrecognized) carries anything the device layer
/// could not map to a known kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadEvent {
    /// The lightpad's motion sensor fired.
    MotionSignal { intensity: u16 },
    /// The load's output level changed.
    DimmerChange { level: Level },
    /// The load's measured power draw changed.
    PowerChanged { watts: u32 },
    /// A device event with no dedicated variant.
    Unrecognized { kind: String },
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MotionSignal { intensity } => write!(f, "motion_signal({intensity})"),
            Self::DimmerChange { level } => write!(f, "dimmer_change({level})"),
            Self::PowerChanged { watts } => write!(f, "power_changed({watts}W)"),
            Self::Unrecognized { kind } => write!(f, "unrecognized({kind})"),
        }
    }
}
