//! Level — the brightness of a dimmable load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output level of a load, from `0` (off) to `255` (full).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const OFF: Self = Self(0);
    pub const FULL: Self = Self(u8::MAX);

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Strict comparison against a threshold.
    #[must_use]
    pub const fn is_above(self, threshold: Self) -> bool {
        self.0 > threshold.0
    }
}

impl From<u8> for Level {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
