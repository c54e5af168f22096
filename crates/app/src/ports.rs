//! Port definitions — traits that device adapters implement.
//!
//! Ports are the boundaries between the rule engine and the device-control
//! layer. They are defined here (in `app`) so that both the rules and the
//! adapters can depend on them without creating circular dependencies.

pub mod house;
pub mod load;

pub use house::House;
pub use load::{Load, Subscription, Trigger};
