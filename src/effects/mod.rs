//! Perform/teardown lifecycles around the pure core.
//!
//! This module is the "imperative shell": it runs caller-supplied
//! handlers and teardowns when conditions change outcome.
//!
//! # Key Concepts
//!
//! - **Handler**: callback run when a condition becomes satisfied; may
//!   return a teardown
//! - **Tracker**: one condition and one handler, fed action lists explicitly
//! - **Registry**: an owned action set plus any number of conditionals,
//!   re-evaluated on every effective mutation
//!
//! Everything here is single-threaded and synchronous. Panics raised by
//! handlers or teardowns propagate to the call that triggered them.

mod conditional;
mod handler;
mod lifecycle;
mod registry;
mod tracker;

pub use conditional::Conditional;
pub use handler::{Handler, IntoTeardown, Teardown};
pub use registry::{ConditionalApi, ConditionalRegistry, RegistryConfig};
pub use tracker::ConditionTracker;
