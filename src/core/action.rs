//! Action tokens and immutable action-set snapshots.
//!
//! An action is any value that marks an event as having happened. The
//! set of currently "done" actions is held as an [`ActionSet`] snapshot:
//! every mutation produces a new snapshot (or reports that nothing
//! changed), so readers never observe a half-applied update.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Marker trait for action tokens.
///
/// Actions only need value equality and hashing so they can be stored
/// in a set. The trait is implemented for every type that qualifies.
///
/// # Example
///
/// ```rust
/// use conditional::core::Action;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Step {
///     OpenedMenu,
///     ClickedSave,
/// }
///
/// fn assert_action<T: Action>() {}
/// assert_action::<Step>();
/// assert_action::<&'static str>();
/// ```
pub trait Action: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Action for T {}

/// Immutable snapshot of the actions that are currently done.
///
/// Cloning a snapshot is cheap; the underlying set is shared. The
/// mutating operations return `None` when the result would have the same
/// membership as `self`, which lets callers skip re-evaluation entirely.
///
/// # Example
///
/// ```rust
/// use conditional::core::ActionSet;
///
/// let empty: ActionSet<&str> = ActionSet::new();
/// let opened = empty.with("opened").unwrap();
///
/// assert!(opened.contains(&"opened"));
/// assert!(!empty.contains(&"opened")); // Original unchanged
/// assert!(opened.with("opened").is_none()); // Already present
/// ```
#[derive(Clone, Debug)]
pub struct ActionSet<T: Action> {
    actions: Arc<HashSet<T>>,
}

impl<T: Action> Default for ActionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Action> PartialEq for ActionSet<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.actions, &other.actions) || self.actions == other.actions
    }
}

impl<T: Action> Eq for ActionSet<T> {}

impl<T: Action> FromIterator<T> for ActionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            actions: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<T: Action> ActionSet<T> {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self {
            actions: Arc::new(HashSet::new()),
        }
    }

    /// Check whether an action is done in this snapshot.
    pub fn contains(&self, action: &T) -> bool {
        self.actions.contains(action)
    }

    /// Check whether every given action is done in this snapshot.
    ///
    /// An empty input is trivially satisfied.
    pub fn contains_all<'a, I>(&self, actions: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        actions.into_iter().all(|action| self.contains(action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over the done actions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.actions.iter()
    }

    /// Snapshot with `action` added, or `None` if it is already done.
    pub fn with(&self, action: T) -> Option<Self> {
        if self.contains(&action) {
            return None;
        }

        let mut actions = (*self.actions).clone();
        actions.insert(action);
        Some(Self {
            actions: Arc::new(actions),
        })
    }

    /// Snapshot with `action` removed, or `None` if it was not done.
    pub fn without(&self, action: &T) -> Option<Self> {
        if !self.contains(action) {
            return None;
        }

        let mut actions = (*self.actions).clone();
        actions.remove(action);
        Some(Self {
            actions: Arc::new(actions),
        })
    }

    /// Snapshot holding exactly the given actions (deduplicated), or
    /// `None` if that is the membership `self` already has.
    pub fn replaced<I>(&self, actions: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let next: Self = actions.into_iter().collect();
        if next == *self {
            None
        } else {
            Some(next)
        }
    }

    /// Empty snapshot, or `None` if `self` is already empty.
    pub fn cleared(&self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(Self::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestAction {
        Opened,
        Saved,
        Closed,
    }

    #[test]
    fn with_adds_missing_action() {
        let set = ActionSet::new();
        let next = set.with(TestAction::Opened).unwrap();

        assert!(next.contains(&TestAction::Opened));
        assert_eq!(next.len(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn with_reports_existing_action_as_unchanged() {
        let set: ActionSet<_> = [TestAction::Opened].into_iter().collect();

        assert!(set.with(TestAction::Opened).is_none());
    }

    #[test]
    fn without_removes_present_action() {
        let set: ActionSet<_> = [TestAction::Opened, TestAction::Saved].into_iter().collect();
        let next = set.without(&TestAction::Opened).unwrap();

        assert!(!next.contains(&TestAction::Opened));
        assert!(next.contains(&TestAction::Saved));
        assert!(set.without(&TestAction::Closed).is_none());
    }

    #[test]
    fn replaced_deduplicates_and_ignores_order() {
        let set: ActionSet<_> = [TestAction::Opened, TestAction::Saved].into_iter().collect();

        assert!(set
            .replaced(vec![TestAction::Saved, TestAction::Opened, TestAction::Saved])
            .is_none());

        let next = set
            .replaced(vec![TestAction::Closed, TestAction::Closed])
            .unwrap();
        assert_eq!(next.len(), 1);
        assert!(next.contains(&TestAction::Closed));
    }

    #[test]
    fn cleared_is_unchanged_when_empty() {
        let empty: ActionSet<TestAction> = ActionSet::new();
        assert!(empty.cleared().is_none());

        let set: ActionSet<_> = [TestAction::Saved].into_iter().collect();
        assert!(set.cleared().unwrap().is_empty());
    }

    #[test]
    fn contains_all_checks_every_action() {
        let set: ActionSet<_> = [TestAction::Opened, TestAction::Saved].into_iter().collect();

        assert!(set.contains_all(&[TestAction::Opened, TestAction::Saved]));
        assert!(!set.contains_all(&[TestAction::Opened, TestAction::Closed]));
        assert!(set.contains_all(&[]));
    }

    #[test]
    fn clones_share_storage_and_compare_equal() {
        let set: ActionSet<_> = [TestAction::Opened].into_iter().collect();
        let cloned = set.clone();

        assert_eq!(set, cloned);
    }
}
