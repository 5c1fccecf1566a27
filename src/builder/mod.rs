//! Builder API for ergonomic conditional construction.
//!
//! This module provides a validating fluent builder and the
//! [`condition!`](crate::condition) macro.

pub mod conditional;
pub mod error;
pub mod macros;

pub use conditional::ConditionalBuilder;
pub use error::BuildError;

use crate::core::Condition;
use crate::effects::{Conditional, Handler, IntoTeardown};

/// Create an unnamed conditional from a condition and a closure.
///
/// # Example
///
/// ```
/// use ::conditional::{builder::conditional, condition};
///
/// let hint = conditional(condition!(undone: ["hint_seen"]), || println!("show hint"));
/// assert!(hint.name.is_none());
/// ```
pub fn conditional<T, F, R>(when: Condition<T>, perform: F) -> Conditional<T>
where
    F: Fn() -> R + 'static,
    R: IntoTeardown,
{
    Conditional::new(when, Handler::new(perform))
}

/// Create a named conditional from a condition and a closure.
///
/// # Example
///
/// ```
/// use conditional::{builder::named_conditional, condition};
///
/// let banner = named_conditional("banner", condition!(done: ["signed_in"]), || {});
/// assert_eq!(banner.name.as_deref(), Some("banner"));
/// ```
pub fn named_conditional<T, F, R>(
    name: impl Into<String>,
    when: Condition<T>,
    perform: F,
) -> Conditional<T>
where
    F: Fn() -> R + 'static,
    R: IntoTeardown,
{
    conditional(when, perform).named(name)
}
