//! # plumhub-domain
//!
//! Pure domain model for the plumhub rule engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Levels** (the 0–255 brightness of a dimmable load)
//! - Define **Load events** (motion signals, dimmer changes, …) delivered to triggers
//! - Define **Load snapshots** (name, level, last change) used for logging and lookup
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod level;
pub mod load;
