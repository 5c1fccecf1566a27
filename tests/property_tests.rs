//! Property-based tests for condition evaluation and the action registry.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use conditional::core::{evaluate, ActionSet, Condition};
use conditional::effects::{Conditional, ConditionalRegistry, Handler, Teardown};
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum TestAction {
    Opened,
    Scrolled,
    Typed,
    Saved,
    Closed,
}

prop_compose! {
    fn arbitrary_action()(variant in 0..5u8) -> TestAction {
        match variant {
            0 => TestAction::Opened,
            1 => TestAction::Scrolled,
            2 => TestAction::Typed,
            3 => TestAction::Saved,
            _ => TestAction::Closed,
        }
    }
}

fn action_list() -> impl Strategy<Value = Vec<TestAction>> {
    prop::collection::vec(arbitrary_action(), 0..8)
}

fn arbitrary_condition() -> impl Strategy<Value = Condition<TestAction>> {
    prop_oneof![
        Just(Condition::Always),
        action_list().prop_map(Condition::done),
        action_list().prop_map(Condition::undone),
        (action_list(), action_list()).prop_map(|(done, undone)| Condition::done(done).and_undone(undone)),
    ]
}

proptest! {
    #[test]
    fn always_holds_for_every_set(actions in action_list()) {
        let set: ActionSet<_> = actions.into_iter().collect();
        prop_assert!(evaluate(&Condition::Always, &set));
    }

    #[test]
    fn done_holds_iff_subset(done in action_list(), actions in action_list()) {
        let set: ActionSet<_> = actions.iter().cloned().collect();
        let expected = done.iter().all(|a| actions.contains(a));

        prop_assert_eq!(evaluate(&Condition::done(done), &set), expected);
    }

    #[test]
    fn undone_holds_iff_disjoint(undone in action_list(), actions in action_list()) {
        let set: ActionSet<_> = actions.iter().cloned().collect();
        let expected = !undone.iter().any(|a| actions.contains(a));

        prop_assert_eq!(evaluate(&Condition::undone(undone), &set), expected);
    }

    #[test]
    fn evaluate_with_list_matches_set(when in arbitrary_condition(), actions in action_list()) {
        let set: ActionSet<_> = actions.iter().cloned().collect();

        prop_assert_eq!(when.evaluate_with(|a| actions.contains(a)), when.evaluate(&set));
    }

    #[test]
    fn equality_ignores_order_and_duplicates(done in action_list(), undone in action_list()) {
        let left = Condition::done(done.clone()).and_undone(undone.clone());

        let mut shuffled_done = done.clone();
        shuffled_done.reverse();
        shuffled_done.extend(done);
        let mut shuffled_undone = undone.clone();
        shuffled_undone.reverse();
        let right = Condition::done(shuffled_done).and_undone(shuffled_undone);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn equal_conditions_evaluate_equally(when in arbitrary_condition(), actions in action_list()) {
        let set: ActionSet<_> = actions.into_iter().collect();
        let copy = when.clone();

        prop_assert_eq!(&when, &copy);
        prop_assert_eq!(when.evaluate(&set), copy.evaluate(&set));
    }

    #[test]
    fn set_actions_reflects_deduplicated_list(actions in action_list()) {
        let registry: ConditionalRegistry<TestAction> = ConditionalRegistry::new();
        registry.set_actions(actions.clone());

        let expected: HashSet<_> = actions.into_iter().collect();
        let snapshot = registry.actions();
        let observed: HashSet<_> = snapshot.iter().cloned().collect();

        prop_assert_eq!(snapshot.len(), expected.len());
        prop_assert_eq!(observed, expected);
    }

    #[test]
    fn do_action_is_idempotent(
        when in arbitrary_condition(),
        setup in action_list(),
        action in arbitrary_action()
    ) {
        let calls = Rc::new(Cell::new(0usize));
        let teardowns = Rc::new(Cell::new(0usize));
        let (c, t) = (calls.clone(), teardowns.clone());
        let registry = ConditionalRegistry::new();
        registry.set_actions(setup);
        registry.define_conditional(Conditional::new(
            when,
            Handler::new(move || {
                c.set(c.get() + 1);
                let t = t.clone();
                Teardown::new(move || t.set(t.get() + 1))
            }),
        ));

        registry.do_action(action.clone());
        let after_once = (calls.get(), teardowns.get());
        registry.do_action(action);

        prop_assert_eq!((calls.get(), teardowns.get()), after_once);
    }

    #[test]
    fn performed_tracks_condition_after_every_mutation(
        when in arbitrary_condition(),
        steps in prop::collection::vec((arbitrary_action(), any::<bool>()), 0..20)
    ) {
        let registry = ConditionalRegistry::new();
        registry.define_conditional(
            Conditional::new(when.clone(), Handler::new(|| {})).named("tracked"),
        );

        for (action, add) in steps {
            if add {
                registry.do_action(action);
            } else {
                registry.undo_action(&action);
            }
            prop_assert_eq!(
                registry.is_performed("tracked"),
                Some(registry.check_condition(&when))
            );
        }
    }

    #[test]
    fn teardowns_never_exceed_performs(
        when in arbitrary_condition(),
        steps in prop::collection::vec(action_list(), 0..10)
    ) {
        let calls = Rc::new(Cell::new(0usize));
        let teardowns = Rc::new(Cell::new(0usize));
        let (c, t) = (calls.clone(), teardowns.clone());
        let registry = ConditionalRegistry::new();
        registry.define_conditional(Conditional::new(
            when,
            Handler::new(move || {
                c.set(c.get() + 1);
                let t = t.clone();
                Teardown::new(move || t.set(t.get() + 1))
            }),
        ));

        for actions in steps {
            registry.set_actions(actions);
            let (performs, cleanups) = (calls.get(), teardowns.get());
            prop_assert!(performs == cleanups || performs == cleanups + 1);
        }
    }
}
