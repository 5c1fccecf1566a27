//! Single condition bound to a single handler.

use crate::core::{Action, Condition, LifecycleEvent};
use crate::effects::handler::Handler;
use crate::effects::lifecycle::Lifecycle;

/// Binds one condition and one handler to a perform/teardown lifecycle.
///
/// The caller pushes the current actions in with
/// [`verify_and_perform`](Self::verify_and_perform). The handler runs once
/// each time the condition goes from unsatisfied to satisfied, and the
/// teardown it returned runs when the condition stops holding.
///
/// # Example
///
/// ```rust
/// use conditional::core::Condition;
/// use conditional::effects::{ConditionTracker, Handler};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let shown = Rc::new(Cell::new(0));
/// let counter = shown.clone();
/// let mut tracker = ConditionTracker::new(
///     Condition::done(["opened"]).and_undone(["dismissed"]),
///     Handler::new(move || counter.set(counter.get() + 1)),
/// );
///
/// tracker.verify_and_perform(&["opened"]);
/// tracker.verify_and_perform(&["opened"]);
/// assert_eq!(shown.get(), 1);
///
/// tracker.verify_and_perform(&["opened", "dismissed"]);
/// assert!(!tracker.is_performed());
/// ```
#[derive(Debug)]
pub struct ConditionTracker<T> {
    when: Condition<T>,
    handler: Handler,
    lifecycle: Lifecycle,
}

impl<T: Action> ConditionTracker<T> {
    pub fn new(when: Condition<T>, handler: Handler) -> Self {
        Self {
            when,
            handler,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Evaluate against `actions` (treated as a set) and drive the lifecycle.
    ///
    /// Panics raised by the handler or teardown propagate to the caller.
    pub fn verify_and_perform(&mut self, actions: &[T]) {
        let satisfied = self.when.evaluate_with(|action| actions.contains(action));

        match self.lifecycle.plan(satisfied) {
            Some(LifecycleEvent::Performed) => {
                let teardown = self.handler.call();
                self.lifecycle.mark_performed(teardown);
                tracing::debug!(condition = ?self.when, "condition performed");
            }
            Some(LifecycleEvent::TornDown) => self.revoke(),
            None => {}
        }
    }

    /// Run the pending teardown, if performed, and mark unperformed.
    pub fn revoke(&mut self) {
        if !self.lifecycle.is_performed() {
            return;
        }

        if let Some(teardown) = self.lifecycle.take_teardown() {
            teardown.run();
        }
        self.lifecycle.mark_revoked();
        tracing::debug!(condition = ?self.when, "condition torn down");
    }

    /// Bind a new handler.
    ///
    /// A different handler revokes the current lifecycle first, so a
    /// teardown is never kept paired with a handler that did not produce
    /// it. Re-supplying the same handler is a no-op.
    pub fn set_handler(&mut self, handler: Handler) {
        if self.handler.same(&handler) {
            return;
        }

        self.revoke();
        self.handler = handler;
    }

    /// Replace the condition. The next `verify_and_perform` settles the
    /// lifecycle against it.
    pub fn set_condition(&mut self, when: Condition<T>) {
        self.when = when;
    }

    pub fn condition(&self) -> &Condition<T> {
        &self.when
    }

    pub fn is_performed(&self) -> bool {
        self.lifecycle.is_performed()
    }
}
