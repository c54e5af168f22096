//! Errors raised while wiring rules.
//!
//! Once installed, rules never fail outward: triggers are fire-and-forget.

/// Errors from the rule constructors.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A rule that spawns timers was built outside a tokio runtime.
    #[error("no tokio runtime available to run timers")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
