//! Perform/teardown bookkeeping shared by trackers and registries.

use crate::core::LifecycleEvent;
use crate::effects::handler::Teardown;

/// Runtime state of one conditional: whether its handler is in effect,
/// and the teardown that undoes it.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    performed: bool,
    teardown: Option<Teardown>,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_performed(&self) -> bool {
        self.performed
    }

    /// Decide which transition, if any, a fresh evaluation calls for (pure).
    pub(crate) fn plan(&self, satisfied: bool) -> Option<LifecycleEvent> {
        match (satisfied, self.performed) {
            (true, false) => Some(LifecycleEvent::Performed),
            (false, true) => Some(LifecycleEvent::TornDown),
            _ => None,
        }
    }

    /// Record that the handler ran and produced `teardown`.
    pub(crate) fn mark_performed(&mut self, teardown: Option<Teardown>) {
        self.performed = true;
        self.teardown = teardown;
    }

    pub(crate) fn take_teardown(&mut self) -> Option<Teardown> {
        self.teardown.take()
    }

    pub(crate) fn mark_revoked(&mut self) {
        self.performed = false;
        self.teardown = None;
    }
}
