//! Conditional: declarative perform/teardown lifecycles over actions
//!
//! Conditional tracks a set of "done" actions and runs handlers while
//! conditions over those actions hold. The condition logic is a pure
//! core with no side effects; handlers and teardowns are run by a thin
//! imperative shell that a UI host drives once per update cycle.
//!
//! # Core Concepts
//!
//! - **Action**: any hashable token marking an event as having happened
//! - **Condition**: actions that must be done, and actions that must not be
//! - **Conditional**: a condition bound to a handler, optionally named
//! - **Teardown**: cleanup returned by a handler, run when its condition
//!   stops holding
//!
//! # Example
//!
//! ```rust
//! use conditional::condition;
//! use conditional::effects::{Conditional, ConditionalRegistry, Handler, Teardown};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! enum Tour {
//!     OpenedEditor,
//!     TypedText,
//!     Dismissed,
//! }
//!
//! let visible = Rc::new(Cell::new(false));
//! let flag = visible.clone();
//!
//! let registry = ConditionalRegistry::new();
//! registry.define_conditional(
//!     Conditional::new(
//!         condition!(done: [Tour::OpenedEditor], undone: [Tour::TypedText, Tour::Dismissed]),
//!         Handler::new(move || {
//!             flag.set(true);
//!             let flag = flag.clone();
//!             Teardown::new(move || flag.set(false))
//!         }),
//!     )
//!     .named("typing-hint"),
//! );
//!
//! registry.do_action(Tour::OpenedEditor);
//! assert!(visible.get());
//!
//! registry.do_action(Tour::TypedText);
//! assert!(!visible.get());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use builder::{BuildError, ConditionalBuilder};
pub use config::{ConditionTable, ConfigError};
pub use crate::core::{evaluate, Action, ActionSet, Condition, LifecycleEvent, LifecycleHistory};
pub use effects::{
    ConditionTracker, Conditional, ConditionalApi, ConditionalRegistry, Handler, RegistryConfig,
    Teardown,
};
