//! Conditional definitions handed to a registry.

use crate::builder::ConditionalBuilder;
use crate::core::Condition;
use crate::effects::handler::Handler;

/// A condition bound to a perform handler, optionally named.
///
/// The name identifies the conditional across redefinitions. Unnamed
/// conditionals are matched by structural equality of their condition.
#[derive(Clone, Debug)]
pub struct Conditional<T> {
    pub name: Option<String>,
    pub when: Condition<T>,
    pub perform: Handler,
}

impl<T> Conditional<T> {
    pub fn new(when: Condition<T>, perform: Handler) -> Self {
        Self {
            name: None,
            when,
            perform,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Start a validated, fluent definition.
    pub fn builder() -> ConditionalBuilder<T> {
        ConditionalBuilder::new()
    }
}
