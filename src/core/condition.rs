//! Conditions over done and undone actions.
//!
//! A condition is either [`Condition::Always`] or a pair of optional
//! lists: actions that must be done and actions that must not be. Both
//! evaluation and equality treat the lists as sets, so order and
//! duplicates never matter.

use super::action::{Action, ActionSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The `done`/`undone` lists of a non-trivial condition.
///
/// An absent list imposes no constraint. When serialized, absent lists
/// are omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Requirements<T> {
    /// Actions that must all be done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<Vec<T>>,
    /// Actions of which none may be done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undone: Option<Vec<T>>,
}

impl<T> Default for Requirements<T> {
    fn default() -> Self {
        Self {
            done: None,
            undone: None,
        }
    }
}

impl<T> Requirements<T> {
    /// True when neither list is present.
    pub fn is_empty(&self) -> bool {
        self.done.is_none() && self.undone.is_none()
    }
}

/// Predicate over which actions have or have not happened.
///
/// Serializes as `null` for [`Condition::Always`] and as
/// `{"done": [...], "undone": [...]}` otherwise.
///
/// # Example
///
/// ```rust
/// use conditional::core::{ActionSet, Condition};
///
/// let when = Condition::done(["signed_in"]).and_undone(["dismissed"]);
///
/// let signed_in: ActionSet<_> = ["signed_in"].into_iter().collect();
/// assert!(when.evaluate(&signed_in));
///
/// let dismissed: ActionSet<_> = ["signed_in", "dismissed"].into_iter().collect();
/// assert!(!when.evaluate(&dismissed));
///
/// assert!(Condition::<&str>::always().evaluate(&ActionSet::new()));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    from = "Option<Requirements<T>>",
    into = "Option<Requirements<T>>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub enum Condition<T> {
    /// Satisfied regardless of the action set.
    Always,
    /// Satisfied when the requirements hold.
    Requires(Requirements<T>),
}

impl<T> From<Option<Requirements<T>>> for Condition<T> {
    fn from(requirements: Option<Requirements<T>>) -> Self {
        requirements.map_or(Condition::Always, Condition::Requires)
    }
}

impl<T> From<Condition<T>> for Option<Requirements<T>> {
    fn from(condition: Condition<T>) -> Self {
        match condition {
            Condition::Always => None,
            Condition::Requires(requirements) => Some(requirements),
        }
    }
}

impl<T> From<Requirements<T>> for Condition<T> {
    fn from(requirements: Requirements<T>) -> Self {
        Condition::Requires(requirements)
    }
}

impl<T> Condition<T> {
    /// The condition that always holds.
    pub fn always() -> Self {
        Condition::Always
    }

    /// Condition requiring every given action to be done.
    pub fn done<I: IntoIterator<Item = T>>(actions: I) -> Self {
        Condition::Requires(Requirements {
            done: Some(actions.into_iter().collect()),
            undone: None,
        })
    }

    /// Condition requiring none of the given actions to be done.
    pub fn undone<I: IntoIterator<Item = T>>(actions: I) -> Self {
        Condition::Requires(Requirements {
            done: None,
            undone: Some(actions.into_iter().collect()),
        })
    }

    /// Replace the `done` list, keeping any `undone` list.
    pub fn and_done<I: IntoIterator<Item = T>>(self, actions: I) -> Self {
        let mut requirements = self.into_requirements();
        requirements.done = Some(actions.into_iter().collect());
        Condition::Requires(requirements)
    }

    /// Replace the `undone` list, keeping any `done` list.
    pub fn and_undone<I: IntoIterator<Item = T>>(self, actions: I) -> Self {
        let mut requirements = self.into_requirements();
        requirements.undone = Some(actions.into_iter().collect());
        Condition::Requires(requirements)
    }

    pub fn requirements(&self) -> Option<&Requirements<T>> {
        match self {
            Condition::Always => None,
            Condition::Requires(requirements) => Some(requirements),
        }
    }

    fn into_requirements(self) -> Requirements<T> {
        match self {
            Condition::Always => Requirements::default(),
            Condition::Requires(requirements) => requirements,
        }
    }

    /// Evaluate against an arbitrary membership test.
    ///
    /// `is_done` answers whether a single action is currently done. This
    /// is the form used when the caller only holds a plain list.
    pub fn evaluate_with<F>(&self, is_done: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let Condition::Requires(requirements) = self else {
            return true;
        };

        let done_holds = requirements
            .done
            .as_ref()
            .is_none_or(|done| done.iter().all(&is_done));
        let undone_holds = requirements
            .undone
            .as_ref()
            .is_none_or(|undone| !undone.iter().any(&is_done));

        done_holds && undone_holds
    }
}

impl<T: Action> Condition<T> {
    /// Evaluate against an action-set snapshot.
    pub fn evaluate(&self, actions: &ActionSet<T>) -> bool {
        self.evaluate_with(|action| actions.contains(action))
    }
}

/// Evaluate `condition` against `actions`.
///
/// Free-standing form of [`Condition::evaluate`].
pub fn evaluate<T: Action>(condition: &Condition<T>, actions: &ActionSet<T>) -> bool {
    condition.evaluate(actions)
}

fn same_members<T: Action>(left: &Option<Vec<T>>, right: &Option<Vec<T>>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => {
            left.iter().collect::<HashSet<_>>() == right.iter().collect::<HashSet<_>>()
        }
        _ => false,
    }
}

/// Structural equality: lists compare as sets, and a list present on
/// one side only is a difference even when it is empty.
impl<T: Action> PartialEq for Requirements<T> {
    fn eq(&self, other: &Self) -> bool {
        same_members(&self.done, &other.done) && same_members(&self.undone, &other.undone)
    }
}

impl<T: Action> Eq for Requirements<T> {}

impl<T: Action> PartialEq for Condition<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Condition::Always, Condition::Always) => true,
            (Condition::Requires(left), Condition::Requires(right)) => left == right,
            _ => false,
        }
    }
}

impl<T: Action> Eq for Condition<T> {}
