//! Virtual adapter error types.

use plumhub_domain::error::PlumHubError;

/// Errors specific to the virtual house.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// Two configured loads share a display name.
    #[error("duplicate load name {0:?}")]
    DuplicateLoad(String),

    /// `initialize()` was called twice.
    #[error("virtual house already initialized")]
    AlreadyInitialized,

    /// The house was used before `initialize()` or after `teardown()`.
    #[error("virtual house is not running")]
    NotRunning,

    /// A domain-level error (validation, not-found, etc.).
    #[error("domain error")]
    Domain(#[source] PlumHubError),
}

impl VirtualError {
    /// Convert into a [`PlumHubError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> PlumHubError {
        match self {
            Self::Domain(err) => err,
            other => PlumHubError::Device(Box::new(other)),
        }
    }
}

impl From<VirtualError> for PlumHubError {
    fn from(err: VirtualError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plumhub_domain::error::ValidationError;

    #[test]
    fn should_display_duplicate_load_name() {
        let err = VirtualError::DuplicateLoad("Nook".to_string());
        assert_eq!(err.to_string(), "duplicate load name \"Nook\"");
    }

    #[test]
    fn should_convert_already_initialized_to_device_error() {
        let err: PlumHubError = VirtualError::AlreadyInitialized.into();
        assert!(matches!(err, PlumHubError::Device(_)));
    }

    #[test]
    fn should_convert_not_running_to_device_error() {
        let err: PlumHubError = VirtualError::NotRunning.into();
        assert!(matches!(err, PlumHubError::Device(_)));
    }

    #[test]
    fn should_convert_domain_error_back_to_domain() {
        let virtual_err = VirtualError::Domain(ValidationError::EmptyName.into());
        let back: PlumHubError = virtual_err.into();
        assert!(matches!(back, PlumHubError::Validation(_)));
    }
}
