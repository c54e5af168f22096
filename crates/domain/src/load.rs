//! Load — an addressable, controllable device endpoint such as a dimmer.

use serde::{Deserialize, Serialize};

use crate::error::{PlumHubError, ValidationError};
use crate::id::LoadId;
use crate::level::Level;
use crate::time::{Timestamp, now};

/// Point-in-time snapshot of a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadInfo {
    pub id: LoadId,
    pub name: String,
    pub level: Level,
    pub last_changed: Timestamp,
}

impl LoadInfo {
    /// Create a builder for constructing a [`LoadInfo`].
    #[must_use]
    pub fn builder() -> LoadInfoBuilder {
        LoadInfoBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PlumHubError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), PlumHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Record a level change. Returns `false` when the level is unchanged.
    pub fn update_level(&mut self, level: Level, at: Timestamp) -> bool {
        if self.level == level {
            return false;
        }
        self.level = level;
        self.last_changed = at;
        true
    }
}

/// Step-by-step builder for [`LoadInfo`].
#[derive(Debug, Default)]
pub struct LoadInfoBuilder {
    id: Option<LoadId>,
    name: Option<String>,
    level: Option<Level>,
}

impl LoadInfoBuilder {
    #[must_use]
    pub fn id(mut self, id: LoadId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Consume the builder, validate, and return a [`LoadInfo`].
    ///
    /// # Errors
    ///
    /// Returns [`PlumHubError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<LoadInfo, PlumHubError> {
        let load = LoadInfo {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            last_changed: now(),
        };
        load.validate()?;
        Ok(load)
    }
}
