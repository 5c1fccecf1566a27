//! Pure core: actions, conditions, and lifecycle history.
//!
//! This module contains everything that can be computed without running
//! user callbacks:
//! - Action tokens and immutable action-set snapshots
//! - Conditions, their evaluation, and structural equality
//! - Immutable lifecycle history
//!
//! Nothing in this module has side effects.

mod action;
mod condition;
mod history;

pub use action::{Action, ActionSet};
pub use condition::{evaluate, Condition, Requirements};
pub use history::{LifecycleEvent, LifecycleHistory, LifecycleRecord};
