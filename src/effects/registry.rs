//! Registry of conditionals driven by a shared action set.
//!
//! The registry owns one [`ActionSet`] snapshot and an ordered list of
//! conditionals. Every mutation that changes the snapshot runs an
//! evaluation pass that performs or tears down each conditional whose
//! condition changed outcome.
//!
//! # Re-entrancy
//!
//! Handlers and teardowns run with no registry borrow held, so they may
//! call back into the registry through a captured [`ConditionalApi`].
//! Such calls update the snapshot immediately but do not start a nested
//! pass: the running pass is marked dirty and repeats until nothing else
//! was requested.

use crate::core::{
    Action, ActionSet, Condition, LifecycleEvent, LifecycleHistory, LifecycleRecord,
};
use crate::effects::conditional::Conditional;
use crate::effects::handler::{Handler, Teardown};
use crate::effects::lifecycle::Lifecycle;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Registry options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Number of lifecycle records kept; 0 disables history.
    pub history_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            history_capacity: 64,
        }
    }
}

#[derive(Debug)]
struct Entry<T> {
    name: Option<String>,
    when: Condition<T>,
    perform: Handler,
    lifecycle: Lifecycle,
}

impl<T> Entry<T> {
    fn label(&self, slot: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("#{slot}"))
    }
}

enum Step {
    Perform(Handler),
    TearDown(Option<Teardown>),
}

#[derive(Debug)]
struct RegistryState<T: Action> {
    config: RegistryConfig,
    actions: ActionSet<T>,
    entries: Vec<Entry<T>>,
    names: HashMap<String, usize>,
    history: LifecycleHistory,
    evaluating: bool,
    dirty: bool,
}

impl<T: Action> RegistryState<T> {
    fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            actions: ActionSet::new(),
            entries: Vec::new(),
            names: HashMap::new(),
            history: LifecycleHistory::new(),
            evaluating: false,
            dirty: false,
        }
    }

    fn note(&mut self, slot: usize, event: LifecycleEvent) {
        let label = self.entries[slot].label(slot);
        tracing::debug!(conditional = %label, %event, "lifecycle transition");

        let capacity = self.config.history_capacity;
        if capacity > 0 {
            self.history = self
                .history
                .record(LifecycleRecord {
                    conditional: label,
                    event,
                    timestamp: Utc::now(),
                })
                .retain_last(capacity);
        }
    }

    /// Match `conditional` against existing entries and update or append.
    ///
    /// Returns the teardown of an entry whose handler was replaced while
    /// performed; the caller runs it once the borrow is released.
    fn define(&mut self, conditional: Conditional<T>) -> Option<Teardown> {
        let Conditional {
            name,
            when,
            perform,
        } = conditional;
        let named_slot = name.as_deref().and_then(|n| self.names.get(n).copied());

        let slot = match named_slot {
            Some(slot) => {
                let entry = &mut self.entries[slot];
                if entry.when != when {
                    tracing::debug!(conditional = ?entry.name, when = ?when, "condition redefined");
                    entry.when = when;
                }
                slot
            }
            // O(n) scan; conditional counts are small.
            None => match self
                .entries
                .iter()
                .position(|entry| entry.name.is_none() && entry.when == when)
            {
                Some(slot) => {
                    if let Some(name) = name {
                        self.names.insert(name.clone(), slot);
                        self.entries[slot].name = Some(name);
                    }
                    slot
                }
                None => {
                    let slot = self.entries.len();
                    if let Some(name) = &name {
                        self.names.insert(name.clone(), slot);
                    }
                    tracing::debug!(slot, name = ?name, when = ?when, "conditional registered");
                    self.entries.push(Entry {
                        name,
                        when,
                        perform,
                        lifecycle: Lifecycle::new(),
                    });
                    return None;
                }
            },
        };

        let entry = &mut self.entries[slot];
        if entry.perform.same(&perform) {
            return None;
        }
        entry.perform = perform;
        if !entry.lifecycle.is_performed() {
            return None;
        }

        let teardown = entry.lifecycle.take_teardown();
        entry.lifecycle.mark_revoked();
        self.note(slot, LifecycleEvent::TornDown);
        teardown
    }

    fn begin_round(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Resets the in-progress marker, including when a callback panics.
struct PassGuard<'a, T: Action>(&'a RefCell<RegistryState<T>>);

impl<T: Action> Drop for PassGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_borrow_mut() {
            state.evaluating = false;
            state.dirty = false;
        }
    }
}

/// Cloneable handle to a registry's action API.
///
/// Every clone drives the same registry, so a handle can be captured by
/// handlers and teardowns.
///
/// A teardown that panics leaves its entry performed with no teardown
/// attached; the next pass revokes it without running any cleanup.
#[derive(Debug)]
pub struct ConditionalApi<T: Action> {
    state: Rc<RefCell<RegistryState<T>>>,
}

impl<T: Action> Clone for ConditionalApi<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Action> ConditionalApi<T> {
    /// Mark `action` done. No-op if it already is.
    pub fn do_action(&self, action: T) {
        self.apply("do_action", |actions| actions.with(action));
    }

    /// Mark `action` not done. No-op if it is not done.
    pub fn undo_action(&self, action: &T) {
        self.apply("undo_action", |actions| actions.without(action));
    }

    /// Replace the done actions with `actions`, deduplicated. No-op if
    /// the membership is unchanged.
    pub fn set_actions<I>(&self, actions: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.apply("set_actions", |current| current.replaced(actions));
    }

    /// Forget all done actions. No-op if none are done.
    pub fn clear_actions(&self) {
        self.apply("clear_actions", |actions| actions.cleared());
    }

    /// Whether every given action is currently done.
    pub fn validate_actions(&self, actions: &[T]) -> bool {
        self.state.borrow().actions.contains_all(actions)
    }

    /// Evaluate `when` against the current actions.
    pub fn check_condition(&self, when: &Condition<T>) -> bool {
        when.evaluate(&self.state.borrow().actions)
    }

    /// Replace the condition of the conditional named `name`.
    ///
    /// Returns `false` if no conditional has that name.
    pub fn update_condition(&self, name: &str, when: Condition<T>) -> bool {
        let found = {
            let mut state = self.state.borrow_mut();
            match state.names.get(name).copied() {
                Some(slot) => {
                    let entry = &mut state.entries[slot];
                    if entry.when != when {
                        tracing::debug!(conditional = name, when = ?when, "condition updated");
                        entry.when = when;
                    }
                    true
                }
                None => false,
            }
        };

        if found {
            self.evaluate_all();
        }
        found
    }

    /// Current action snapshot.
    pub fn actions(&self) -> ActionSet<T> {
        self.state.borrow().actions.clone()
    }

    fn apply<F>(&self, operation: &'static str, change: F)
    where
        F: FnOnce(&ActionSet<T>) -> Option<ActionSet<T>>,
    {
        let changed = {
            let mut state = self.state.borrow_mut();
            match change(&state.actions) {
                Some(next) => {
                    state.actions = next;
                    true
                }
                None => false,
            }
        };

        if changed {
            tracing::debug!(operation, "actions changed");
            self.evaluate_all();
        } else {
            tracing::trace!(operation, "actions unchanged");
        }
    }

    /// Run an evaluation pass over every conditional, or mark the running
    /// pass dirty when called from inside a handler.
    fn evaluate_all(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.dirty = true;
            if state.evaluating {
                tracing::trace!("evaluation deferred to the running pass");
                return;
            }
            state.evaluating = true;
        }

        let _pass = PassGuard(&self.state);
        while self.state.borrow_mut().begin_round() {
            let mut slot = 0;
            while slot < self.state.borrow().entries.len() {
                self.settle(slot);
                slot += 1;
            }
        }
    }

    fn settle(&self, slot: usize) {
        let step = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let entry = &mut state.entries[slot];
            match entry.lifecycle.plan(entry.when.evaluate(&state.actions)) {
                Some(LifecycleEvent::Performed) => Step::Perform(entry.perform.clone()),
                Some(LifecycleEvent::TornDown) => Step::TearDown(entry.lifecycle.take_teardown()),
                None => return,
            }
        };

        match step {
            Step::Perform(handler) => {
                let teardown = handler.call();
                let stale = {
                    let mut state = self.state.borrow_mut();
                    let entry = &mut state.entries[slot];
                    if entry.perform.same(&handler) {
                        entry.lifecycle.mark_performed(teardown);
                        state.note(slot, LifecycleEvent::Performed);
                        None
                    } else {
                        // Handler was replaced while it ran.
                        state.dirty = true;
                        teardown
                    }
                };
                if let Some(teardown) = stale {
                    teardown.run();
                }
            }
            Step::TearDown(teardown) => {
                if let Some(teardown) = teardown {
                    teardown.run();
                }
                let mut state = self.state.borrow_mut();
                // The teardown may already have revoked the entry by redefining it.
                if state.entries[slot].lifecycle.is_performed() {
                    state.entries[slot].lifecycle.mark_revoked();
                    state.note(slot, LifecycleEvent::TornDown);
                }
            }
        }
    }
}

/// Owns an action set and the conditionals evaluated against it.
///
/// # Example
///
/// ```rust
/// use conditional::condition;
/// use conditional::effects::{Conditional, ConditionalRegistry, Handler};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let shown = Rc::new(Cell::new(0));
/// let counter = shown.clone();
///
/// let registry = ConditionalRegistry::new();
/// registry.define_conditional(
///     Conditional::new(
///         condition!(done: ["opened", "scrolled"]),
///         Handler::new(move || counter.set(counter.get() + 1)),
///     )
///     .named("tour"),
/// );
///
/// registry.do_action("opened");
/// registry.do_action("scrolled");
/// registry.do_action("scrolled");
///
/// assert_eq!(shown.get(), 1);
/// assert_eq!(registry.is_performed("tour"), Some(true));
/// ```
#[derive(Debug)]
pub struct ConditionalRegistry<T: Action> {
    api: ConditionalApi<T>,
}

impl<T: Action> Clone for ConditionalRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: Action> Default for ConditionalRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Action> ConditionalRegistry<T> {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            api: ConditionalApi {
                state: Rc::new(RefCell::new(RegistryState::new(config))),
            },
        }
    }

    /// The registry together with a handle to its action API.
    pub fn split(self) -> (Self, ConditionalApi<T>) {
        let api = self.api.clone();
        (self, api)
    }

    pub fn api(&self) -> ConditionalApi<T> {
        self.api.clone()
    }

    /// Register a conditional, or update the existing one it matches.
    ///
    /// A named conditional matches the entry with the same name. Any
    /// other conditional matches an unnamed entry with a structurally
    /// equal condition; a name it carries is given to that entry. On a
    /// match, a changed condition replaces the old one and a different
    /// handler revokes the entry before replacing its handler. Without a
    /// match a new entry is appended. A full evaluation pass follows.
    pub fn define_conditional(&self, conditional: Conditional<T>) {
        let stale = self.api.state.borrow_mut().define(conditional);
        if let Some(teardown) = stale {
            teardown.run();
        }
        self.api.evaluate_all();
    }

    /// Full evaluation pass; the host calls this once per update cycle.
    pub fn reconcile(&self) {
        self.api.evaluate_all();
    }

    pub fn do_action(&self, action: T) {
        self.api.do_action(action);
    }

    pub fn undo_action(&self, action: &T) {
        self.api.undo_action(action);
    }

    pub fn set_actions<I>(&self, actions: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.api.set_actions(actions);
    }

    pub fn clear_actions(&self) {
        self.api.clear_actions();
    }

    pub fn validate_actions(&self, actions: &[T]) -> bool {
        self.api.validate_actions(actions)
    }

    pub fn check_condition(&self, when: &Condition<T>) -> bool {
        self.api.check_condition(when)
    }

    pub fn update_condition(&self, name: &str, when: Condition<T>) -> bool {
        self.api.update_condition(name, when)
    }

    pub fn actions(&self) -> ActionSet<T> {
        self.api.actions()
    }

    /// Whether the conditional named `name` is performed, or `None` if
    /// there is no such conditional.
    pub fn is_performed(&self, name: &str) -> Option<bool> {
        let state = self.api.state.borrow();
        let slot = state.names.get(name).copied()?;
        Some(state.entries[slot].lifecycle.is_performed())
    }

    /// Number of registered conditionals.
    pub fn len(&self) -> usize {
        self.api.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn history(&self) -> LifecycleHistory {
        self.api.state.borrow().history.clone()
    }

    pub fn config(&self) -> RegistryConfig {
        self.api.state.borrow().config.clone()
    }
}
